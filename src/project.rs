use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Date format used for due dates, e.g. "25/12/2026".
pub const DUE_DATE_FORMAT: &str = "%d/%m/%Y";

/// Lane a project card lives in. Serialized as the exact strings the board
/// file has always used ("todo", "inProgress", "done"); anything else found
/// in a stored file is carried through as `Other` so the blob round-trips,
/// but such a card matches no lane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "todo")]
    Todo,
    #[serde(rename = "inProgress")]
    InProgress,
    #[serde(rename = "done")]
    Done,
    #[serde(untagged)]
    Other(String),
}

impl Status {
    /// The three lanes, in board order.
    pub const LANES: [Status; 3] = [Status::Todo, Status::InProgress, Status::Done];

    pub fn title(&self) -> &str {
        match self {
            Status::Todo => "To Do",
            Status::InProgress => "In Progress",
            Status::Done => "Done",
            Status::Other(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// "DD/MM/YYYY", or empty when no due date was given.
    #[serde(rename = "dueDate")]
    pub due_date: String,
    pub status: Status,
}

/// Urgency flag derived from a card's due date at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueFlag {
    None,
    DueToday,
    Overdue,
}

impl Project {
    /// Builds a new project with a fresh id. New projects always start in
    /// the to-do lane.
    pub fn new(name: String, kind: String, due_date: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            kind,
            due_date,
            status: Status::Todo,
        }
    }

    /// Day-granularity due-date check against the given date. Done cards and
    /// cards with a missing or unparseable due date are never flagged.
    pub fn due_flag(&self, today: NaiveDate) -> DueFlag {
        if self.status == Status::Done {
            return DueFlag::None;
        }
        let Ok(due) = NaiveDate::parse_from_str(&self.due_date, DUE_DATE_FORMAT) else {
            return DueFlag::None;
        };
        if due == today {
            DueFlag::DueToday
        } else if due < today {
            DueFlag::Overdue
        } else {
            DueFlag::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DUE_DATE_FORMAT).unwrap()
    }

    #[test]
    fn new_project_starts_in_todo_with_unique_id() {
        let a = Project::new("Site".into(), "Web".into(), "01/01/2027".into());
        let b = Project::new("Site".into(), "Web".into(), "01/01/2027".into());
        assert_eq!(a.status, Status::Todo);
        assert_eq!(b.status, Status::Todo);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn status_serializes_as_board_file_strings() {
        assert_eq!(serde_json::to_string(&Status::Todo).unwrap(), "\"todo\"");
        assert_eq!(
            serde_json::to_string(&Status::InProgress).unwrap(),
            "\"inProgress\""
        );
        assert_eq!(serde_json::to_string(&Status::Done).unwrap(), "\"done\"");
    }

    #[test]
    fn unknown_status_round_trips_as_other() {
        let status: Status = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(status, Status::Other("archived".into()));
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"archived\"");
    }

    #[test]
    fn project_uses_original_json_field_names() {
        let project = Project {
            id: "p1".into(),
            name: "Site".into(),
            kind: "Web".into(),
            due_date: "01/01/2024".into(),
            status: Status::Todo,
        };
        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["type"], "Web");
        assert_eq!(json["dueDate"], "01/01/2024");
        assert_eq!(json["status"], "todo");
    }

    #[test]
    fn due_today_is_flagged() {
        let mut project = Project::new("Site".into(), "Web".into(), "01/01/2024".into());
        assert_eq!(project.due_flag(date("01/01/2024")), DueFlag::DueToday);

        // Same stored state, later viewing date: overdue instead.
        assert_eq!(project.due_flag(date("02/01/2024")), DueFlag::Overdue);

        // Not yet due.
        assert_eq!(project.due_flag(date("31/12/2023")), DueFlag::None);

        // Done cards never carry a flag.
        project.status = Status::Done;
        assert_eq!(project.due_flag(date("02/01/2024")), DueFlag::None);
    }

    #[test]
    fn missing_or_bad_due_date_is_never_flagged() {
        let blank = Project::new("Site".into(), "Web".into(), String::new());
        assert_eq!(blank.due_flag(date("01/01/2024")), DueFlag::None);

        let junk = Project::new("Site".into(), "Web".into(), "soonish".into());
        assert_eq!(junk.due_flag(date("01/01/2024")), DueFlag::None);
    }
}
