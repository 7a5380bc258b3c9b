// service/starter_kit.rs
use serde::Serialize;

use crate::models::workspacemodel::{TaskPriority, TaskStatus};

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct MilestoneTemplate {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct TaskTemplate {
    pub title: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
}

#[derive(Debug, Serialize, Clone)]
pub struct StarterKit {
    pub milestones: Vec<MilestoneTemplate>,
    pub tasks: Vec<TaskTemplate>,
    pub tech_stack: Vec<String>,
    pub requirements: Vec<String>,
}

fn milestone(title: &str, description: &str) -> MilestoneTemplate {
    MilestoneTemplate {
        title: title.to_string(),
        description: description.to_string(),
    }
}

fn task(title: &str, priority: TaskPriority) -> TaskTemplate {
    TaskTemplate {
        title: title.to_string(),
        status: TaskStatus::Todo,
        priority,
    }
}

/// Deterministic starter kit keyed by substring match on the domain name.
/// No persistence; callers decide what to do with the templates.
pub fn generate_starter_kit(domain: &str, _skills_required: &[String]) -> StarterKit {
    let mut milestones = Vec::new();
    let mut tech_stack: Vec<String> = Vec::new();

    if !domain.is_empty() {
        if domain.contains("AI") || domain.contains("Machine Learning") {
            milestones = vec![
                milestone("Data Collection & Preprocessing", "Gather and clean datasets"),
                milestone("Model Development", "Build and train ML models"),
                milestone("Testing & Validation", "Test model performance"),
                milestone("Deployment", "Deploy model to production"),
            ];
            tech_stack = vec![
                "Python".to_string(),
                "TensorFlow/PyTorch".to_string(),
                "Pandas".to_string(),
                "NumPy".to_string(),
                "Scikit-learn".to_string(),
            ];
        } else if domain.contains("Web") {
            milestones = vec![
                milestone("Design & Planning", "Create wireframes and plan architecture"),
                milestone("Frontend Development", "Build user interface"),
                milestone("Backend Development", "Implement server and API"),
                milestone("Testing & Deployment", "Test and deploy application"),
            ];
            tech_stack = vec![
                "React/Vue".to_string(),
                "Node.js/Django".to_string(),
                "PostgreSQL/MongoDB".to_string(),
            ];
        } else {
            milestones = vec![
                milestone("Planning & Research", "Research and plan project"),
                milestone("Development", "Build core features"),
                milestone("Testing", "Test functionality"),
                milestone("Launch", "Launch project"),
            ];
        }
    }

    let tasks = vec![
        task("Set up development environment", TaskPriority::High),
        task("Create project repository", TaskPriority::High),
        task("Write project documentation", TaskPriority::Medium),
    ];

    let requirements = vec![
        "Project Overview".to_string(),
        "Functional Requirements".to_string(),
        "Non-functional Requirements".to_string(),
        "Technical Specifications".to_string(),
        "Timeline & Milestones".to_string(),
    ];

    StarterKit {
        milestones,
        tasks,
        tech_stack,
        requirements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ml_domain_gets_ml_milestones() {
        let kit = generate_starter_kit("AI & Machine Learning", &[]);
        assert_eq!(kit.milestones.len(), 4);
        assert_eq!(kit.milestones[0].title, "Data Collection & Preprocessing");
        assert!(kit.tech_stack.contains(&"Python".to_string()));
    }

    #[test]
    fn web_domain_gets_web_milestones() {
        let kit = generate_starter_kit("Web Development", &[]);
        assert_eq!(kit.milestones.len(), 4);
        assert_eq!(kit.milestones[0].title, "Design & Planning");
    }

    #[test]
    fn unknown_domain_gets_generic_fallback() {
        let kit = generate_starter_kit("Unknown", &[]);
        assert_eq!(kit.milestones.len(), 4);
        assert_eq!(kit.milestones[0].title, "Planning & Research");
        assert!(kit.tech_stack.is_empty());
    }

    #[test]
    fn empty_domain_gets_no_milestones() {
        let kit = generate_starter_kit("", &[]);
        assert!(kit.milestones.is_empty());
    }

    #[test]
    fn bootstrap_tasks_and_requirements_always_present() {
        let kit = generate_starter_kit("Robotics", &["ros".to_string()]);
        assert_eq!(kit.tasks.len(), 3);
        assert_eq!(kit.tasks[0].priority, TaskPriority::High);
        assert_eq!(kit.requirements.len(), 5);
    }

    #[test]
    fn generator_is_deterministic() {
        let a = generate_starter_kit("AI & Machine Learning", &[]);
        let b = generate_starter_kit("AI & Machine Learning", &[]);
        assert_eq!(a.milestones, b.milestones);
        assert_eq!(a.tech_stack, b.tech_stack);
    }
}
