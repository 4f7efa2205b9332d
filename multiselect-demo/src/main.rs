//! Terminal host for the multiselect control.
//!
//! Click the input to open the panel, type to filter, click rows to toggle,
//! click anywhere else to close. `q` quits while closed, Ctrl+C always.

mod terminal;
mod view;

use std::fs::File;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use futures::StreamExt;
use multiselect::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};

use terminal::TerminalGuard;
use view::{Frame, Hit};

const FRUIT: &[&str] = &[
    "Apple", "Banana", "Cherry", "Date", "Elderberry", "Fig", "Grape", "Honeydew", "Kiwi",
    "Lemon", "Mango", "Nectarine", "Orange", "Papaya", "Quince", "Raspberry",
];

fn demo_catalog() -> Vec<(usize, String)> {
    (0..5_000)
        .map(|i| (i, format!("{} #{:04}", FRUIT[i % FRUIT.len()], i)))
        .collect()
}

fn demo_options() -> Options {
    Options::new()
        .multi()
        .with_summary(true)
        .with_max_display_items(2)
        .with_row_height(1)
        .with_header_height(1)
        .with_max_viewport_height(12)
        .with_placeholder("Pick some fruit...")
}

struct Demo {
    control: Controller<usize>,
    list: FixedSizeList,
    hovered: Option<usize>,
    selected_count: Arc<AtomicUsize>,
    frame: Frame,
}

enum Flow {
    Continue,
    Quit,
}

impl Demo {
    fn new(options: Options) -> Result<Self, multiselect::ConfigError> {
        let selected_count = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&selected_count);
        let control = Controller::builder()
            .options(options)
            .catalog(demo_catalog())
            .hub(PointerHub::new())
            .on_change(move |keys: &[usize]| {
                log::info!("selection changed: {} keys", keys.len());
                sink.store(keys.len(), Ordering::SeqCst);
            })
            .build()?;

        Ok(Self {
            control,
            list: FixedSizeList::new().with_overscan(1),
            hovered: None,
            selected_count,
            frame: Frame::default(),
        })
    }

    fn handle(&mut self, event: Event) -> Flow {
        match event {
            Event::Key(key) => return self.key(key),
            Event::Mouse(mouse) => self.mouse(mouse),
            Event::Resize(width, height) => log::debug!("resize {}x{}", width, height),
            _ => {}
        }
        Flow::Continue
    }

    fn key(&mut self, key: KeyEvent) -> Flow {
        if key.kind != KeyEventKind::Press {
            return Flow::Continue;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Flow::Quit;
        }

        let open = self.control.is_open();
        match key.code {
            KeyCode::Esc if open => {
                self.control.close();
            }
            KeyCode::Esc | KeyCode::Char('q') if !open => return Flow::Quit,
            KeyCode::Char(c) if open => {
                let mut query = self.control.query();
                query.push(c);
                self.set_query(query);
            }
            KeyCode::Backspace if open => {
                let mut query = self.control.query();
                query.pop();
                self.set_query(query);
            }
            _ => {}
        }
        Flow::Continue
    }

    fn set_query(&mut self, query: String) {
        self.control.set_query(query);
        // New view, start from the top.
        self.list.scroll.scroll_to(0);
        self.hovered = None;
    }

    fn mouse(&mut self, mouse: MouseEvent) {
        let (x, y) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                // Outside clicks close the panel before anything else sees them.
                self.control.hub().dispatch(&PointerEvent::new(x, y));
                self.click(x, y);
            }
            MouseEventKind::Moved => {
                self.hovered = match self.frame.hit(x, y) {
                    Some(Hit::Row(row)) => self.row_index(row),
                    _ => None,
                };
            }
            MouseEventKind::ScrollDown | MouseEventKind::ScrollUp => {
                if let Some(Hit::Row(_)) = self.frame.hit(x, y) {
                    let step = i64::from(self.control.options().row_height);
                    let delta = match mouse.kind {
                        MouseEventKind::ScrollDown => step,
                        _ => -step,
                    };
                    self.list.scroll.scroll_by(delta);
                }
            }
            _ => {}
        }
    }

    fn click(&mut self, x: u16, y: u16) {
        match self.frame.hit(x, y) {
            Some(Hit::Clear) => self.control.clear(),
            Some(Hit::Input) => {
                self.control.activate();
                self.list.scroll.scroll_to(0);
            }
            Some(Hit::Header) => {
                self.control.select_all();
            }
            Some(Hit::Row(row)) => {
                let key = self.control.window().and_then(|window| {
                    let index = self.list.index_at(&window, row)?;
                    window.row(index).map(|row| row.item.key)
                });
                if let Some(key) = key {
                    self.control.toggle(key);
                }
            }
            None => {}
        }
    }

    fn row_index(&self, row: u32) -> Option<usize> {
        let window = self.control.window()?;
        self.list.index_at(&window, row)
    }
}

async fn run(mut demo: Demo) -> std::io::Result<()> {
    let mut term = TerminalGuard::enter()?;
    let mut events = EventStream::new();

    loop {
        let selected = demo.selected_count.load(Ordering::SeqCst);
        demo.frame = term.draw(&demo.control, &mut demo.list, demo.hovered, selected)?;

        let Some(event) = events.next().await else {
            break;
        };
        if let Flow::Quit = demo.handle(event?) {
            break;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let log_file = File::create("multiselect-demo.log").expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let options = match std::env::args().nth(1) {
        Some(path) => Options::from_json_file(path),
        None => Ok(demo_options()),
    };

    let demo = match options.and_then(Demo::new) {
        Ok(demo) => demo,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };

    if let Err(e) = run(demo).await {
        eprintln!("Error: {}", e);
    }
}
