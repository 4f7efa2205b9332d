use multiselect::{Panel, PanelEvent, PanelState, Transition};

#[test]
fn test_activation_toggles() {
    let mut panel = Panel::new();
    assert_eq!(panel.state(), PanelState::Closed);

    assert_eq!(panel.handle(PanelEvent::Activate), Transition::Opened);
    assert!(panel.is_open());

    assert_eq!(panel.handle(PanelEvent::Activate), Transition::Closed);
    assert!(!panel.is_open());
}

#[test]
fn test_outside_pointer_only_closes() {
    let mut panel = Panel::new();
    assert_eq!(panel.handle(PanelEvent::OutsidePointer), Transition::Unchanged);
    assert_eq!(panel.state(), PanelState::Closed);

    panel.handle(PanelEvent::Open);
    assert_eq!(panel.handle(PanelEvent::OutsidePointer), Transition::Closed);
}

#[test]
fn test_programmatic_open_close() {
    let mut panel = Panel::new();
    assert_eq!(panel.handle(PanelEvent::Close), Transition::Unchanged);
    assert_eq!(panel.handle(PanelEvent::Open), Transition::Opened);
    assert_eq!(panel.handle(PanelEvent::Open), Transition::Unchanged);
    assert_eq!(panel.handle(PanelEvent::Close), Transition::Closed);
}

#[test]
fn test_query_cleared_on_close() {
    for closing in [PanelEvent::Activate, PanelEvent::OutsidePointer, PanelEvent::Close] {
        let mut panel = Panel::new();
        panel.handle(PanelEvent::Activate);
        assert!(panel.set_query("ban"));
        assert_eq!(panel.query(), "ban");

        panel.handle(closing);
        assert_eq!(panel.query(), "", "query survived {:?}", closing);
    }
}

#[test]
fn test_query_rejected_while_closed() {
    let mut panel = Panel::new();
    assert!(!panel.set_query("apple"));
    assert_eq!(panel.query(), "");
}
