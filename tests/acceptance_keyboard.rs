//! Acceptance tests for keyboard and pointer interaction
//!
//! Drives the full terminal app over the sample directory fixture and checks
//! the observable tree state after each user action.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use rovetree::flatten::FlattenOptions;
use rovetree::source::InputSource;
use rovetree::view::{ColorConfig, TuiApp, TuiSettings};
use std::path::PathBuf;

// ===== Test Fixtures =====

const SAMPLE_FIXTURE: &str = "tests/fixtures/sample-directory.json";

fn launch(flatten_options: FlattenOptions) -> TuiApp<TestBackend> {
    let nodes = InputSource::File(PathBuf::from(SAMPLE_FIXTURE))
        .read_nodes()
        .expect("fixture should load");
    let settings = TuiSettings {
        flatten_options,
        colors: ColorConfig::disabled(),
        ..TuiSettings::default()
    };
    let terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
    let mut app = TuiApp::with_terminal(terminal, &nodes, settings);
    app.handle_event(Event::Resize(40, 12)).unwrap();
    app
}

fn press(app: &mut TuiApp<TestBackend>, code: KeyCode) {
    let quit = app
        .handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
        .unwrap();
    assert!(!quit, "{code:?} should not quit");
}

fn focused_label(app: &TuiApp<TestBackend>) -> String {
    app.tree()
        .current_focusable_item()
        .map(|item| item.data().label().to_string())
        .unwrap_or_default()
}

fn label_at(app: &TuiApp<TestBackend>, index: usize) -> &str {
    app.tree().content()[index].data().label()
}

// ===== Scenario 1: Flattening =====

#[test]
fn sample_structure_flattens_to_42_items() {
    // GIVEN: the sample directory/report/letter structure
    // WHEN: it is loaded
    let app = launch(FlattenOptions::default());

    // THEN: every folder and file becomes one item
    assert_eq!(app.tree().len(), 42);
    assert_eq!(app.tree().visible_len(), 42);
    assert_eq!(label_at(&app, 0), "Projects");
    assert_eq!(label_at(&app, 41), "letter-3D.docx");
}

// ===== Scenario 2: ArrowRight =====

#[test]
fn arrow_right_expands_then_enters_first_child() {
    // GIVEN: every parent collapsed, focus on "Projects"
    let mut app = launch(FlattenOptions::collapsed());
    assert_eq!(focused_label(&app), "Projects");

    // WHEN: ArrowRight on the collapsed parent
    press(&mut app, KeyCode::Right);

    // THEN: it expands and keeps roving focus
    let projects = &app.tree().content()[0];
    assert_eq!(projects.expanded(), Some(true));
    assert!(projects.is_focusable());

    // WHEN: ArrowRight again
    press(&mut app, KeyCode::Right);

    // THEN: focus moves to the first child and the parent gives up tab index 0
    assert_eq!(focused_label(&app), "project-1.docx");
    assert_eq!(app.tree().content()[0].tab_index().value(), -1);
    assert_eq!(app.tree().content()[1].tab_index().value(), 0);
    assert_eq!(app.virtualizer().focused(), Some(1));
}

// ===== Scenario 3: End then ArrowUp =====

#[test]
fn end_then_arrow_up_twice_moves_two_positions_back() {
    // GIVEN: the fully expanded sample tree
    let mut app = launch(FlattenOptions::default());

    // WHEN: End, then ArrowUp twice
    press(&mut app, KeyCode::End);
    assert_eq!(focused_label(&app), "letter-3D.docx");
    press(&mut app, KeyCode::Up);
    press(&mut app, KeyCode::Up);

    // THEN: focus is two positions before the last visible item
    assert_eq!(focused_label(&app), "letter-3B.docx");
    assert_eq!(app.tree().current_position(), Some(39));
    assert_eq!(app.virtualizer().focused(), Some(39));
}

// ===== Scenario 4: Expand siblings =====

#[test]
fn asterisk_expands_level_one_siblings_only() {
    // GIVEN: every parent collapsed, focus on level-1 "Projects"
    let mut app = launch(FlattenOptions::collapsed());

    // WHEN: `*`
    press(&mut app, KeyCode::Char('*'));

    // THEN: all three level-1 groups are expanded, nothing deeper
    for item in app.tree().content() {
        if item.level() == 1 {
            assert_eq!(item.expanded(), Some(true), "{}", item.data().label());
        } else if item.has_children() {
            assert_eq!(item.expanded(), Some(false), "{}", item.data().label());
        }
    }
    assert_eq!(app.tree().visible_len(), 3 + 5 + 3 + 3);
    assert_eq!(focused_label(&app), "Projects");
}

// ===== Scenario 5: Pointer =====

#[test]
fn click_focuses_selects_and_toggles_row() {
    // GIVEN: every parent collapsed
    let mut app = launch(FlattenOptions::collapsed());

    // WHEN: clicking the "Reports" row (border on row 0)
    app.handle_event(Event::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: 4,
        row: 2,
        modifiers: KeyModifiers::NONE,
    }))
    .unwrap();

    // THEN: it holds focus, is selected and expanded
    assert_eq!(focused_label(&app), "Reports");
    let selected: Vec<_> = app
        .tree()
        .selected_items()
        .iter()
        .map(|item| item.data().label().to_string())
        .collect();
    assert_eq!(selected, vec!["Reports"]);
    assert_eq!(app.tree().content()[12].expanded(), Some(true));
}
