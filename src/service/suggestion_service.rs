// service/suggestion_service.rs
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{
    projectmodel::{Project, ProjectStage},
    workspacemodel::{Milestone, Task, TaskStatus},
};

/// Member headcount under which a seeking_collaborators project is
/// nudged to invite more people.
const MIN_TEAM_SIZE: i64 = 3;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    Task,
    Overdue,
    Milestone,
    Collaboration,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionPriority {
    Medium,
    High,
    Urgent,
}

#[derive(Debug, Serialize, Clone)]
pub struct NextStepSuggestion {
    pub kind: SuggestionKind,
    pub message: String,
    pub priority: SuggestionPriority,
}

/// Next steps for a workspace. First-match ordering, never sorted by
/// priority.
pub fn suggest_next_steps(
    project: &Project,
    member_count: i64,
    tasks: &[Task],
    milestones: &[Milestone],
    now: DateTime<Utc>,
) -> Vec<NextStepSuggestion> {
    let mut suggestions = Vec::new();

    if tasks.is_empty() {
        suggestions.push(NextStepSuggestion {
            kind: SuggestionKind::Task,
            message: "Create your first task to get started".to_string(),
            priority: SuggestionPriority::High,
        });
    }

    let overdue = tasks
        .iter()
        .filter(|task| {
            matches!(task.status, TaskStatus::Todo | TaskStatus::InProgress)
                && task.due_date.map_or(false, |due| due < now)
        })
        .count();
    if overdue > 0 {
        suggestions.push(NextStepSuggestion {
            kind: SuggestionKind::Overdue,
            message: format!("You have {} overdue task(s)", overdue),
            priority: SuggestionPriority::Urgent,
        });
    }

    let upcoming = milestones
        .iter()
        .filter(|milestone| !milestone.completed && milestone.due_date.is_some())
        .count();
    if upcoming > 0 {
        suggestions.push(NextStepSuggestion {
            kind: SuggestionKind::Milestone,
            message: format!("You have {} upcoming milestone(s)", upcoming),
            priority: SuggestionPriority::Medium,
        });
    }

    if project.stage == ProjectStage::SeekingCollaborators && member_count < MIN_TEAM_SIZE {
        suggestions.push(NextStepSuggestion {
            kind: SuggestionKind::Collaboration,
            message: "Consider inviting more collaborators".to_string(),
            priority: SuggestionPriority::Medium,
        });
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::projectmodel::Visibility;
    use crate::models::workspacemodel::TaskPriority;
    use chrono::Duration;
    use uuid::Uuid;

    fn project(stage: ProjectStage) -> Project {
        Project {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            title: "p".to_string(),
            description: String::new(),
            problem_statement: None,
            domain: None,
            tags: vec![],
            skills_required: vec![],
            stage,
            visibility: Visibility::Public,
            location: None,
            city: None,
            state: None,
            country: None,
            cover_image_url: None,
            demo_video_url: None,
            views_count: 0,
            likes_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn task(status: TaskStatus, due: Option<DateTime<Utc>>) -> Task {
        Task {
            id: Uuid::new_v4(),
            workspace_id: Uuid::new_v4(),
            title: "t".to_string(),
            description: None,
            status,
            priority: TaskPriority::Medium,
            assigned_to: None,
            created_by: Uuid::new_v4(),
            due_date: due,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn milestone(completed: bool, due: Option<DateTime<Utc>>) -> Milestone {
        Milestone {
            id: Uuid::new_v4(),
            workspace_id: Uuid::new_v4(),
            title: "m".to_string(),
            description: None,
            due_date: due,
            completed,
            completed_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_workspace_seeking_collaborators() {
        let now = Utc::now();
        let suggestions =
            suggest_next_steps(&project(ProjectStage::SeekingCollaborators), 1, &[], &[], now);

        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].kind, SuggestionKind::Task);
        assert_eq!(suggestions[0].priority, SuggestionPriority::High);
        assert_eq!(suggestions[1].kind, SuggestionKind::Collaboration);
        assert_eq!(suggestions[1].priority, SuggestionPriority::Medium);
    }

    #[test]
    fn overdue_tasks_counted() {
        let now = Utc::now();
        let tasks = vec![
            task(TaskStatus::Todo, Some(now - Duration::days(1))),
            task(TaskStatus::InProgress, Some(now - Duration::hours(2))),
            // done tasks never count as overdue
            task(TaskStatus::Done, Some(now - Duration::days(3))),
            // future due dates don't count
            task(TaskStatus::Todo, Some(now + Duration::days(1))),
        ];

        let suggestions = suggest_next_steps(&project(ProjectStage::InProgress), 5, &tasks, &[], now);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].kind, SuggestionKind::Overdue);
        assert_eq!(suggestions[0].message, "You have 2 overdue task(s)");
        assert_eq!(suggestions[0].priority, SuggestionPriority::Urgent);
    }

    #[test]
    fn incomplete_dated_milestones_counted() {
        let now = Utc::now();
        let milestones = vec![
            milestone(false, Some(now + Duration::days(7))),
            // undated milestones are never "upcoming"
            milestone(false, None),
            milestone(true, Some(now + Duration::days(7))),
        ];
        let tasks = vec![task(TaskStatus::Done, None)];

        let suggestions =
            suggest_next_steps(&project(ProjectStage::InProgress), 5, &tasks, &milestones, now);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].kind, SuggestionKind::Milestone);
        assert_eq!(suggestions[0].message, "You have 1 upcoming milestone(s)");
    }

    #[test]
    fn full_team_not_nudged() {
        let now = Utc::now();
        let tasks = vec![task(TaskStatus::Todo, None)];
        let suggestions =
            suggest_next_steps(&project(ProjectStage::SeekingCollaborators), 3, &tasks, &[], now);
        assert!(suggestions.is_empty());
    }

    #[test]
    fn ordering_is_first_match_not_priority() {
        // task (high) comes before overdue (urgent) because checks run in
        // fixed order
        let now = Utc::now();
        let suggestions = suggest_next_steps(
            &project(ProjectStage::SeekingCollaborators),
            1,
            &[],
            &[milestone(false, Some(now))],
            now,
        );

        let kinds: Vec<SuggestionKind> = suggestions.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SuggestionKind::Task,
                SuggestionKind::Milestone,
                SuggestionKind::Collaboration
            ]
        );
    }
}
