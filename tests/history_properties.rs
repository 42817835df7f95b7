use egui::{Color32, pos2};
use shape_canvas::{Document, ToolKind, ToolState};

fn drag(document: &mut Document, tools: &ToolState, from: (f32, f32), to: (f32, f32)) {
    assert!(document.pointer_down(pos2(from.0, from.1)));
    assert!(document.pointer_move(pos2(to.0, to.1), tools));
    assert!(document.pointer_up(pos2(to.0, to.1), tools));
}

fn line_tools() -> ToolState {
    let mut tools = ToolState::default();
    tools.set_tool(ToolKind::Line);
    tools.set_line_width(3.0);
    tools
}

#[test]
fn test_n_undos_return_to_blank() {
    let mut document = Document::new();
    let mut tools = ToolState::default();

    let kinds = [ToolKind::Rectangle, ToolKind::Circle, ToolKind::Line, ToolKind::Rectangle];
    for (i, kind) in kinds.into_iter().enumerate() {
        tools.set_tool(kind);
        let offset = i as f32 * 40.0;
        drag(&mut document, &tools, (20.0 + offset, 20.0), (120.0 + offset, 90.0));
    }
    assert_eq!(document.history().undo_stack().len(), kinds.len());
    assert!(!document.canvas().is_blank());

    for _ in 0..kinds.len() {
        assert!(document.undo());
    }
    assert!(document.canvas().is_blank());
    assert!(!document.history().can_undo());
    assert_eq!(document.history().redo_stack().len(), kinds.len());
}

#[test]
fn test_undo_then_redo_restores_exact_buffer() {
    let mut document = Document::new();
    let tools = line_tools();
    drag(&mut document, &tools, (10.0, 10.0), (300.0, 200.0));
    drag(&mut document, &tools, (400.0, 50.0), (50.0, 400.0));

    let before = document.canvas().capture_snapshot();
    assert!(document.undo());
    assert_ne!(document.canvas().image(), before.image());

    assert!(document.redo());
    assert_eq!(document.canvas().image(), before.image());
    assert_eq!(document.history().last(), Some(&before));
}

#[test]
fn test_redo_reapplies_oldest_undone_shape_first() {
    let mut document = Document::new();
    let tools = line_tools();
    drag(&mut document, &tools, (10.0, 10.0), (300.0, 10.0));
    let after_first = document.canvas().capture_snapshot();
    drag(&mut document, &tools, (10.0, 100.0), (300.0, 100.0));

    assert!(document.undo());
    assert!(document.undo());
    assert!(document.canvas().is_blank());

    assert!(document.redo());
    assert_eq!(document.canvas().image(), after_first.image());
    assert_eq!(document.history().undo_stack().len(), 1);
    assert_eq!(document.history().redo_stack().len(), 1);
}

#[test]
fn test_commit_after_undo_discards_redo_branch() {
    let mut document = Document::new();
    let tools = line_tools();
    drag(&mut document, &tools, (10.0, 10.0), (100.0, 10.0));
    drag(&mut document, &tools, (10.0, 50.0), (100.0, 50.0));
    document.undo();
    document.undo();
    assert_eq!(document.history().redo_stack().len(), 2);

    drag(&mut document, &tools, (10.0, 90.0), (100.0, 90.0));
    assert!(!document.history().can_redo());

    let before = document.canvas().capture_snapshot();
    assert!(!document.redo());
    assert_eq!(document.canvas().image(), before.image());
}

#[test]
fn test_clear_then_undo_is_noop() {
    let mut document = Document::new();
    let tools = line_tools();
    drag(&mut document, &tools, (10.0, 10.0), (100.0, 100.0));

    assert!(document.clear());
    assert!(!document.undo());
    assert!(document.canvas().is_blank());
    assert!(!document.history().can_undo());
    assert!(!document.history().can_redo());
}

#[test]
fn test_last_snapshot_matches_canvas_when_idle() {
    let mut document = Document::new();
    let mut tools = ToolState::default();
    tools.set_tool(ToolKind::Circle);
    tools.set_fill_color(Color32::LIGHT_BLUE);

    drag(&mut document, &tools, (200.0, 200.0), (260.0, 240.0));
    drag(&mut document, &tools, (400.0, 300.0), (420.0, 310.0));
    document.undo();

    let last = document.history().last().expect("one shape left");
    assert_eq!(document.canvas().image(), last.image());
}

#[test]
fn test_history_ops_refused_during_gesture() {
    let mut document = Document::new();
    let tools = line_tools();
    drag(&mut document, &tools, (10.0, 10.0), (100.0, 10.0));

    document.pointer_down(pos2(10.0, 50.0));
    document.pointer_move(pos2(100.0, 50.0), &tools);
    assert!(!document.undo());
    assert!(!document.clear());
    assert_eq!(document.history().undo_stack().len(), 1);

    document.pointer_up(pos2(100.0, 50.0), &tools);
    assert_eq!(document.history().undo_stack().len(), 2);
    assert!(document.undo());
}
