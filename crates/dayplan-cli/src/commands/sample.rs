//! `sample` command: print an example task file.

use super::plan::TaskRecord;

fn sample_records() -> Vec<TaskRecord> {
    vec![
        TaskRecord {
            id: Some("standup".to_string()),
            title: "Team standup".to_string(),
            duration_minutes: 30,
            difficulty: 2,
            fixed_start: Some("10:00".to_string()),
            outdoor: false,
            depends_on: vec![],
            deadline: None,
        },
        TaskRecord {
            id: Some("design".to_string()),
            title: "Design document".to_string(),
            duration_minutes: 90,
            difficulty: 8,
            fixed_start: None,
            outdoor: false,
            depends_on: vec![],
            deadline: Some("16:00".to_string()),
        },
        TaskRecord {
            id: Some("review".to_string()),
            title: "Review design with team".to_string(),
            duration_minutes: 30,
            difficulty: 5,
            fixed_start: None,
            outdoor: false,
            depends_on: vec!["design".to_string()],
            deadline: None,
        },
        TaskRecord {
            id: Some("run".to_string()),
            title: "Afternoon run".to_string(),
            duration_minutes: 45,
            difficulty: 3,
            fixed_start: None,
            outdoor: true,
            depends_on: vec![],
            deadline: None,
        },
    ]
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(&sample_records())?);
    Ok(())
}
