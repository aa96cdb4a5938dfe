use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Areas shared by both tabs
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub content_area: Rect,
    pub status_area: Rect,
}

/// Study tab areas
pub struct StudyLayout {
    pub units_area: Rect,
    pub tasks_area: Rect,
    pub details_area: Rect,
}

/// Tests tab areas
pub struct TestsLayout {
    pub table_area: Rect,
    pub chart_area: Rect,
    pub scores_area: Rect,
}

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Content
/// - Bottom bar: status message (1 row)
pub fn create_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status line
        ])
        .split(area);

    MainLayout {
        keybindings_area: chunks[0],
        content_area: chunks[1],
        status_area: chunks[2],
    }
}

/// Units (25%) | Tasks (45%) | Details (30%)
pub fn create_study_layout(area: Rect) -> StudyLayout {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(45),
            Constraint::Percentage(30),
        ])
        .split(area);

    StudyLayout {
        units_area: chunks[0],
        tasks_area: chunks[1],
        details_area: chunks[2],
    }
}

/// Table on top; chart (65%) and selected test scores (35%) below
pub fn create_tests_layout(area: Rect) -> TestsLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(rows[1]);

    TestsLayout {
        table_area: rows[0],
        chart_area: bottom[0],
        scores_area: bottom[1],
    }
}

/// Create centered modal area
pub fn create_modal_area(area: Rect) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Length(9),
            Constraint::Percentage(30),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_layout() {
        let area = Rect::new(0, 0, 100, 50);
        let layout = create_layout(area);

        assert_eq!(layout.keybindings_area.height, 1);
        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.content_area.height, 48);

        let study = create_study_layout(layout.content_area);
        assert!(study.units_area.width > 0);
        assert!(study.tasks_area.width > study.units_area.width);
        assert!(study.details_area.height > 0);

        let tests = create_tests_layout(layout.content_area);
        assert!(tests.table_area.height > 0);
        assert!(tests.chart_area.height >= tests.table_area.height);
        assert_eq!(tests.scores_area.height, tests.chart_area.height);
        assert!(tests.chart_area.width > tests.scores_area.width);
    }

    #[test]
    fn test_create_modal_area() {
        let area = Rect::new(0, 0, 100, 50);
        let modal = create_modal_area(area);

        assert!(modal.width < area.width);
        assert_eq!(modal.height, 9);
    }
}
