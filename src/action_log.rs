use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::controller::Intent;

/// Intent applied at a point in the session
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggedAction {
    /// Milliseconds since start
    pub timestamp_ms: u64,
    pub intent: Intent,
}

/// Saved form of a session
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionLog {
    pub cols: i32,
    pub rows: i32,
    pub actions: Vec<LoggedAction>,
}

/// Action logger
pub struct ActionLog {
    start_time: Instant,
    cols: i32,
    rows: i32,
    actions: Vec<LoggedAction>,
}

impl ActionLog {
    pub fn new(cols: i32, rows: i32) -> Self {
        ActionLog {
            start_time: Instant::now(),
            cols,
            rows,
            actions: Vec::new(),
        }
    }

    /// Log an intent with the current timestamp
    pub fn log(&mut self, intent: Intent) {
        let timestamp_ms = self.start_time.elapsed().as_millis() as u64;
        self.actions.push(LoggedAction { timestamp_ms, intent });
    }

    pub fn actions(&self) -> &[LoggedAction] {
        &self.actions
    }

    pub fn to_session(&self) -> SessionLog {
        SessionLog {
            cols: self.cols,
            rows: self.rows,
            actions: self.actions.clone(),
        }
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(&self.to_session())?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Print log to console
    pub fn print(&self) {
        println!("{}", format_actions(&self.actions));
    }

    pub fn summary(&self) -> String {
        summarize(&self.actions)
    }
}

impl SessionLog {
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)?;
        let session: SessionLog = serde_json::from_str(&json)?;
        Ok(session)
    }
}

/// One line per action: timestamp, 1-based index, intent
pub fn format_actions(actions: &[LoggedAction]) -> String {
    let mut out = format!("=== Action Log ({} events) ===\n", actions.len());
    for (i, logged) in actions.iter().enumerate() {
        out.push_str(&format!("[{:6}ms] #{:3} {:?}\n", logged.timestamp_ms, i + 1, logged.intent));
    }
    out.push_str("=== End of Log ===");
    out
}

/// Counts per intent type
pub fn summarize(actions: &[LoggedAction]) -> String {
    use crate::controller::Brush;

    let mut walls = 0;
    let mut floors = 0;
    let mut nav_points = 0;
    let mut examined = 0;
    let mut searches = 0;
    let mut resets = 0;

    for logged in actions {
        match logged.intent {
            Intent::Paint { brush: Brush::Wall, .. } => walls += 1,
            Intent::Paint { brush: Brush::Floor, .. } => floors += 1,
            Intent::PlaceNavPoint { .. } => nav_points += 1,
            Intent::Examine { .. } => examined += 1,
            Intent::SearchOrReset => searches += 1,
            Intent::Reset => resets += 1,
        }
    }

    let duration = actions.last().map(|last| last.timestamp_ms).unwrap_or(0);

    format!(
        "Session Duration: {}ms\n\
         Total Events: {}\n\
         Grid Modifications: {} walls, {} floors, {} navigation points\n\
         Searches/Resets: {} search-or-reset, {} reset, {} examined",
        duration,
        actions.len(),
        walls,
        floors,
        nav_points,
        searches,
        resets,
        examined
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Brush;

    #[test]
    fn summary_counts_intents() {
        let mut log = ActionLog::new(5, 5);
        log.log(Intent::Paint { x: 1, y: 1, brush: Brush::Wall });
        log.log(Intent::Paint { x: 1, y: 2, brush: Brush::Wall });
        log.log(Intent::PlaceNavPoint { x: 0, y: 0 });
        log.log(Intent::SearchOrReset);

        let summary = log.summary();
        assert!(summary.contains("Total Events: 4"));
        assert!(summary.contains("2 walls, 0 floors, 1 navigation points"));
    }

    #[test]
    fn printed_log_has_one_line_per_action() {
        let actions = vec![
            LoggedAction { timestamp_ms: 0, intent: Intent::PlaceNavPoint { x: 0, y: 0 } },
            LoggedAction { timestamp_ms: 1250, intent: Intent::SearchOrReset },
        ];
        let text = format_actions(&actions);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "=== Action Log (2 events) ===");
        assert_eq!(lines[1], "[     0ms] #  1 PlaceNavPoint { x: 0, y: 0 }");
        assert_eq!(lines[2], "[  1250ms] #  2 SearchOrReset");
        assert_eq!(lines[3], "=== End of Log ===");
    }

    #[test]
    fn session_survives_json() {
        let mut log = ActionLog::new(8, 6);
        log.log(Intent::Examine { x: 2, y: 3 });
        let json = serde_json::to_string(&log.to_session()).unwrap();
        let session: SessionLog = serde_json::from_str(&json).unwrap();
        assert_eq!(session.cols, 8);
        assert_eq!(session.rows, 6);
        assert_eq!(session.actions[0].intent, Intent::Examine { x: 2, y: 3 });
    }
}
