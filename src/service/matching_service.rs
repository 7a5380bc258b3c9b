// service/matching_service.rs
use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    db::{cache::CacheHelper, db::DBClient, projectdb::ProjectExt, userdb::UserExt},
    models::{
        projectmodel::{Domain, Project},
        usermodel::User,
    },
    service::error::ServiceError,
};

pub const DEFAULT_MATCH_LIMIT: usize = 10;

/// Candidates at or below this weighted total are dropped from results.
const SCORE_CUTOFF: f64 = 0.2;
const MAX_REASONS: usize = 3;
const RECO_CACHE_TTL_SECONDS: usize = 600;

/// Strategy for comparing a skill set against a project's required skills.
/// Ranking never touches the comparison internals, so exact-match,
/// substring, or embedding-based strategies can be swapped freely.
pub trait SkillMatcher: Send + Sync {
    /// Similarity in [0, 1]. Empty input on either side scores 0.0.
    fn similarity(&self, user_skills: &[String], required_skills: &[String]) -> f64;
}

/// Default strategy: exact set intersection plus half-credit substring
/// matches, normalized by the number of required skills.
#[derive(Debug, Default, Clone)]
pub struct SubstringSkillMatcher;

impl SkillMatcher for SubstringSkillMatcher {
    fn similarity(&self, user_skills: &[String], required_skills: &[String]) -> f64 {
        let user_skills = normalize_skills(user_skills);
        let required_skills = normalize_skills(required_skills);

        if user_skills.is_empty() || required_skills.is_empty() {
            return 0.0;
        }

        let user_set: HashSet<&str> = user_skills.iter().map(|s| s.as_str()).collect();
        let required_set: HashSet<&str> = required_skills.iter().map(|s| s.as_str()).collect();

        let exact = user_set.intersection(&required_set).count();

        // Half credit for substring overlap, first hit per required skill.
        // Skills already counted as exact matches are skipped.
        let mut partial = 0.0;
        for required in &required_skills {
            if user_set.contains(required.as_str()) {
                continue;
            }
            for skill in &user_skills {
                if required.contains(skill.as_str()) || skill.contains(required.as_str()) {
                    partial += 0.5;
                    break;
                }
            }
        }

        let raw = exact as f64 + partial;
        (raw / required_skills.len().max(1) as f64).min(1.0)
    }
}

/// Lowercase, trim, drop empties. Both sides of every comparison go
/// through this.
pub fn normalize_skills(skills: &[String]) -> Vec<String> {
    skills
        .iter()
        .map(|skill| skill.trim().to_lowercase())
        .filter(|skill| !skill.is_empty())
        .collect()
}

fn location_overlap(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) if !a.trim().is_empty() && !b.trim().is_empty() => {
            let a = a.to_lowercase();
            let b = b.to_lowercase();
            a.contains(&b) || b.contains(&a)
        }
        _ => false,
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CollaboratorMatch {
    pub user: User,
    pub score: f64,
    pub reasons: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProjectMatch {
    pub project: Project,
    pub score: f64,
    pub reasons: Vec<String>,
}

#[derive(Clone)]
pub struct MatchingService {
    db_client: Arc<DBClient>,
    skill_matcher: Arc<dyn SkillMatcher>,
}

impl std::fmt::Debug for MatchingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchingService").finish()
    }
}

impl MatchingService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self {
            db_client,
            skill_matcher: Arc::new(SubstringSkillMatcher),
        }
    }

    pub fn with_matcher(db_client: Arc<DBClient>, skill_matcher: Arc<dyn SkillMatcher>) -> Self {
        Self {
            db_client,
            skill_matcher,
        }
    }

    /// Ranked collaborator candidates for a project. Brute force over every
    /// user except the owner, with a per-candidate domain-history lookup.
    pub async fn find_collaborators_for_project(
        &self,
        project: &Project,
        limit: usize,
    ) -> Result<Vec<CollaboratorMatch>, ServiceError> {
        if normalize_skills(&project.skills_required).is_empty() {
            return Ok(vec![]);
        }

        let candidates = self.db_client.get_users_except(project.owner_id).await?;

        let mut pool = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let domains = self.db_client.get_domains_by_owner(candidate.id).await?;
            pool.push((candidate, domains));
        }

        Ok(self.rank_collaborators(project, &pool, limit))
    }

    /// Pure ranking step: score, cut off, sort descending, truncate.
    pub fn rank_collaborators(
        &self,
        project: &Project,
        candidates: &[(User, Vec<Domain>)],
        limit: usize,
    ) -> Vec<CollaboratorMatch> {
        let mut matches: Vec<CollaboratorMatch> = candidates
            .iter()
            .filter(|(candidate, _)| candidate.id != project.owner_id)
            .filter_map(|(candidate, domains)| self.score_collaborator(candidate, domains, project))
            .collect();

        matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        matches.truncate(limit);
        matches
    }

    fn score_collaborator(
        &self,
        candidate: &User,
        candidate_domains: &[Domain],
        project: &Project,
    ) -> Option<CollaboratorMatch> {
        let mut score = 0.0;
        let mut reasons = Vec::new();

        // Skill matching (weight 0.5)
        let skill_match = self
            .skill_matcher
            .similarity(&candidate.skill_names(), &project.skills_required);
        score += skill_match * 0.5;
        if skill_match > 0.3 {
            reasons.push(format!(
                "Matches {}% of required skills",
                (skill_match * 100.0) as i32
            ));
        }

        // Location overlap (weight 0.2)
        if location_overlap(project.location.as_deref(), candidate.location.as_deref()) {
            score += 0.2;
            reasons.push("Same location".to_string());
        }

        // Domain history (weight 0.2)
        if let Some(domain) = project.domain {
            if candidate_domains.contains(&domain) {
                score += 0.2;
                reasons.push(format!("Experience in {}", domain.to_str()));
            }
        }

        // Activity (weight 0.1)
        let activity = (candidate.contribution_streak as f64 / 30.0).min(1.0);
        score += activity * 0.1;

        if score <= SCORE_CUTOFF {
            return None;
        }

        reasons.truncate(MAX_REASONS);
        Some(CollaboratorMatch {
            user: candidate.clone(),
            score,
            reasons,
        })
    }

    /// Ranked project recommendations for a user. Candidate pool is every
    /// public, open-stage project the user neither owns nor joined. Results
    /// are cached briefly in Redis when it is configured; without Redis the
    /// list is recomputed on every call.
    pub async fn recommend_projects_for_user(
        &self,
        user: &User,
        limit: usize,
    ) -> Result<Vec<ProjectMatch>, ServiceError> {
        let cache_key = format!("reco:projects:{}", user.id);

        if let Some(redis_client) = &self.db_client.redis_client {
            if let Ok(Some(cached)) =
                CacheHelper::get::<Vec<ProjectMatch>>(redis_client, &cache_key).await
            {
                let mut cached = cached;
                cached.truncate(limit);
                return Ok(cached);
            }
        }

        let user_domains = self.db_client.get_domains_by_owner(user.id).await?;
        let candidates = self.db_client.get_open_projects_for_user(user.id).await?;

        let matches = self.rank_projects(user, &user_domains, &candidates, limit);

        if let Some(redis_client) = &self.db_client.redis_client {
            let _ = CacheHelper::set(redis_client, &cache_key, &matches, RECO_CACHE_TTL_SECONDS)
                .await;
        }

        Ok(matches)
    }

    /// Pure ranking step for recommendations.
    pub fn rank_projects(
        &self,
        user: &User,
        user_domains: &[Domain],
        candidates: &[Project],
        limit: usize,
    ) -> Vec<ProjectMatch> {
        let user_skills = user.skill_names();

        let mut matches: Vec<ProjectMatch> = candidates
            .iter()
            .filter(|project| project.owner_id != user.id)
            .filter_map(|project| self.score_project(user, &user_skills, user_domains, project))
            .collect();

        matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        matches.truncate(limit);
        matches
    }

    fn score_project(
        &self,
        user: &User,
        user_skills: &[String],
        user_domains: &[Domain],
        project: &Project,
    ) -> Option<ProjectMatch> {
        let mut score = 0.0;
        let mut reasons = Vec::new();

        // Skill matching (weight 0.4)
        let skill_match = self
            .skill_matcher
            .similarity(user_skills, &project.skills_required);
        score += skill_match * 0.4;
        if skill_match > 0.3 {
            reasons.push(format!(
                "Matches your skills ({}%)",
                (skill_match * 100.0) as i32
            ));
        }

        // Domain history (weight 0.3)
        if let Some(domain) = project.domain {
            if user_domains.contains(&domain) {
                score += 0.3;
                reasons.push(format!("Similar to your {} projects", domain.to_str()));
            }
        }

        // Location overlap (weight 0.2)
        if location_overlap(project.location.as_deref(), user.location.as_deref()) {
            score += 0.2;
            reasons.push("Near your location".to_string());
        }

        // Popularity (weight 0.1)
        let popularity =
            ((project.views_count + project.likes_count) as f64 / 100.0).min(1.0);
        score += popularity * 0.1;

        if score <= SCORE_CUTOFF {
            return None;
        }

        reasons.truncate(MAX_REASONS);
        Some(ProjectMatch {
            project: project.clone(),
            score,
            reasons,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::projectmodel::{ProjectStage, Visibility};
    use chrono::Utc;
    use sqlx::types::Json;
    use sqlx::PgPool;
    use std::collections::HashMap;
    use uuid::Uuid;

    use crate::models::usermodel::SkillLevel;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn similarity(user: &[&str], required: &[&str]) -> f64 {
        SubstringSkillMatcher.similarity(&strings(user), &strings(required))
    }

    fn test_user(skills: &[&str], location: Option<&str>, streak: i32) -> User {
        let mut skill_map = HashMap::new();
        for skill in skills {
            skill_map.insert(skill.to_string(), SkillLevel::Intermediate);
        }

        User {
            id: Uuid::new_v4(),
            name: "Test User".to_string(),
            username: format!("user_{}", Uuid::new_v4().simple()),
            email: format!("{}@example.com", Uuid::new_v4().simple()),
            password: None,
            bio: None,
            location: location.map(|l| l.to_string()),
            city: None,
            state: None,
            country: None,
            college: None,
            website: None,
            avatar_url: None,
            skills: Json(skill_map),
            reputation_points: 0,
            contribution_streak: streak,
            last_contribution_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn test_project(
        owner_id: Uuid,
        required: &[&str],
        domain: Option<Domain>,
        location: Option<&str>,
    ) -> Project {
        Project {
            id: Uuid::new_v4(),
            owner_id,
            title: "Test Project".to_string(),
            description: "A project".to_string(),
            problem_statement: None,
            domain,
            tags: vec![],
            skills_required: strings(required),
            stage: ProjectStage::SeekingCollaborators,
            visibility: Visibility::Public,
            location: location.map(|l| l.to_string()),
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

    fn service() -> MatchingService {
        let pool = PgPool::connect_lazy("postgres://localhost/collabnest").unwrap();
        MatchingService::new(Arc::new(DBClient::new(pool)))
    }

    #[test]
    fn identical_skill_sets_score_one() {
        assert_eq!(similarity(&["rust", "sql"], &["rust", "sql"]), 1.0);
    }

    #[test]
    fn empty_inputs_score_zero() {
        assert_eq!(similarity(&[], &["rust"]), 0.0);
        assert_eq!(similarity(&["rust"], &[]), 0.0);
        assert_eq!(similarity(&[], &[]), 0.0);
        assert_eq!(similarity(&["  "], &["rust"]), 0.0);
    }

    #[test]
    fn similarity_is_bounded() {
        let cases: &[(&[&str], &[&str])] = &[
            (&["python", "py", "pyth"], &["python"]),
            (&["a", "b", "c"], &["a", "ab", "abc", "b"]),
            (&["rust"], &["go", "zig", "c"]),
        ];

        for (user, required) in cases {
            let score = similarity(user, required);
            assert!((0.0..=1.0).contains(&score), "score {} out of range", score);
        }
    }

    #[test]
    fn case_and_whitespace_invariant() {
        assert_eq!(
            similarity(&["Python"], &["python "]),
            similarity(&["python"], &["python"])
        );
    }

    #[test]
    fn partial_match_scores_half_credit() {
        // "java" is a substring of "javascript"
        assert_eq!(similarity(&["javascript"], &["java"]), 0.5);
    }

    #[test]
    fn mixed_exact_and_miss_example() {
        // exact match on "python", no match for "django":
        // raw = 1.0 over 2 required skills
        let score = similarity(&["python", "react"], &["Python", "Django"]);
        assert_eq!(score, 0.5);
    }

    #[test]
    fn exact_match_not_double_counted_as_partial() {
        let score = similarity(&["python"], &["python", "go"]);
        assert_eq!(score, 0.5);
    }

    #[tokio::test]
    async fn collaborator_below_cutoff_dropped() {
        let svc = service();
        let owner = Uuid::new_v4();
        // location overlap alone is exactly 0.2, which does not clear
        // the strict > 0.2 cutoff
        let project = test_project(owner, &["rust"], None, Some("Berlin"));
        let candidate = test_user(&[], Some("Berlin"), 0);

        let matches = svc.rank_collaborators(&project, &[(candidate, vec![])], 10);
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn collaborator_ranking_is_monotonic() {
        let svc = service();
        let owner = Uuid::new_v4();
        let project = test_project(owner, &["rust", "sql"], Some(Domain::WebDevelopment), Some("Berlin"));

        let strong = test_user(&["rust", "sql"], Some("Berlin"), 30);
        let medium = test_user(&["rust"], Some("Berlin"), 0);
        let weak = test_user(&["rust"], None, 0);

        let pool = vec![
            (weak, vec![]),
            (strong, vec![Domain::WebDevelopment]),
            (medium, vec![]),
        ];

        let matches = svc.rank_collaborators(&project, &pool, 10);
        assert!(!matches.is_empty());
        for pair in matches.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        for m in &matches {
            assert!(m.score > 0.2);
        }
    }

    #[tokio::test]
    async fn owner_never_matches_own_project() {
        let svc = service();
        let owner = test_user(&["rust", "sql"], Some("Berlin"), 30);
        let project = test_project(owner.id, &["rust", "sql"], None, Some("Berlin"));

        let matches = svc.rank_collaborators(&project, &[(owner, vec![])], 10);
        assert!(matches.is_empty());
    }

    #[test]
    fn empty_required_skills_yield_no_collaborators() {
        // mirrors the async path's early return
        assert!(normalize_skills(&strings(&["", "  "])).is_empty());
        let project = test_project(Uuid::new_v4(), &[], None, None);
        assert!(normalize_skills(&project.skills_required).is_empty());
    }

    #[tokio::test]
    async fn reasons_capped_at_three() {
        let svc = service();
        let owner = Uuid::new_v4();
        let project = test_project(
            owner,
            &["rust", "sql"],
            Some(Domain::DataScience),
            Some("Lagos"),
        );
        let candidate = test_user(&["rust", "sql"], Some("Lagos"), 30);

        let matches = svc.rank_collaborators(&project, &[(candidate, vec![Domain::DataScience])], 10);
        assert_eq!(matches.len(), 1);
        assert!(matches[0].reasons.len() <= 3);
        assert_eq!(matches[0].reasons[0], "Matches 100% of required skills");
        assert_eq!(matches[0].reasons[1], "Same location");
    }

    #[tokio::test]
    async fn truncates_to_limit() {
        let svc = service();
        let owner = Uuid::new_v4();
        let project = test_project(owner, &["rust"], None, None);

        let pool: Vec<(User, Vec<Domain>)> = (0..5)
            .map(|_| (test_user(&["rust"], None, 0), vec![]))
            .collect();

        let matches = svc.rank_collaborators(&project, &pool, 2);
        assert_eq!(matches.len(), 2);
    }

    #[tokio::test]
    async fn user_never_recommended_own_project() {
        let svc = service();
        let user = test_user(&["rust"], None, 0);
        let own_project = test_project(user.id, &["rust"], None, None);

        let matches = svc.rank_projects(&user, &[], &[own_project], 10);
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn project_recommendation_weights() {
        let svc = service();
        let user = test_user(&["rust"], Some("Berlin"), 0);

        // full skill match + domain history + location + saturated popularity
        let mut project = test_project(
            Uuid::new_v4(),
            &["rust"],
            Some(Domain::WebDevelopment),
            Some("Berlin"),
        );
        project.views_count = 80;
        project.likes_count = 40;

        let matches = svc.rank_projects(&user, &[Domain::WebDevelopment], &[project], 10);
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert!((m.score - 1.0).abs() < 1e-9);
        assert_eq!(
            m.reasons,
            vec![
                "Matches your skills (100%)".to_string(),
                "Similar to your Web Development projects".to_string(),
                "Near your location".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn recommendation_below_cutoff_dropped() {
        let svc = service();
        let user = test_user(&[], Some("Berlin"), 0);

        // location only: exactly 0.2, excluded by the strict cutoff
        let project = test_project(Uuid::new_v4(), &["rust"], None, Some("Berlin"));
        let matches = svc.rank_projects(&user, &[], &[project], 10);
        assert!(matches.is_empty());
    }
}
