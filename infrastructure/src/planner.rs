//! Perspective-based research planning.
//!
//! Every query is decomposed into the same configured perspectives, so the
//! plan is deterministic and each subtask lands in a known report section.

use crate::config::FilePerspective;
use async_trait::async_trait;
use research_application::{PlannerError, ResearchPlanner};
use research_domain::Subtask;
use std::collections::HashMap;
use tracing::debug;

/// One analytical angle and the report section it feeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Perspective {
    pub description: String,
    pub perspective: String,
    pub section: String,
}

impl From<&FilePerspective> for Perspective {
    fn from(p: &FilePerspective) -> Self {
        Self {
            description: p.description.clone(),
            perspective: p.perspective.clone(),
            section: p.section.clone(),
        }
    }
}

/// Plans one subtask per configured perspective.
pub struct PerspectivePlanner {
    perspectives: Vec<Perspective>,
}

impl PerspectivePlanner {
    pub fn new(perspectives: Vec<Perspective>) -> Self {
        Self { perspectives }
    }

    pub fn from_config(perspectives: &[FilePerspective]) -> Self {
        Self::new(perspectives.iter().map(Perspective::from).collect())
    }

    /// Perspective name to report section, for perspectives that name one.
    pub fn placements(&self) -> HashMap<String, String> {
        self.perspectives
            .iter()
            .filter(|p| !p.section.is_empty())
            .map(|p| (p.perspective.clone(), p.section.clone()))
            .collect()
    }
}

#[async_trait]
impl ResearchPlanner for PerspectivePlanner {
    async fn plan(&self, query: &str) -> Result<Vec<Subtask>, PlannerError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(PlannerError::EmptyQuery);
        }
        let subtasks: Vec<Subtask> = self
            .perspectives
            .iter()
            .enumerate()
            .map(|(i, p)| {
                Subtask::new(
                    (i + 1).to_string(),
                    format!("{}: {}", p.description, query),
                    p.perspective.clone(),
                )
            })
            .collect();
        debug!("Planned {} subtasks for '{}'", subtasks.len(), query);
        Ok(subtasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilePlannerConfig;

    #[tokio::test]
    async fn test_plan_uses_every_perspective() {
        let planner = PerspectivePlanner::from_config(&FilePlannerConfig::default().perspectives);
        let plan = planner.plan("  humanoid robots ").await.unwrap();
        assert_eq!(plan.len(), 4);
        assert_eq!(plan[0].id, "1");
        assert_eq!(plan[0].description, "Analyze Market Size: humanoid robots");
        assert_eq!(plan[0].perspective, "Industry");
        assert_eq!(plan[3].perspective, "Financial");
    }

    #[tokio::test]
    async fn test_plan_rejects_empty_query() {
        let planner = PerspectivePlanner::from_config(&FilePlannerConfig::default().perspectives);
        assert_eq!(planner.plan("  ").await, Err(PlannerError::EmptyQuery));
    }

    #[test]
    fn test_placements_skip_unsectioned() {
        let planner = PerspectivePlanner::new(vec![
            Perspective {
                description: "Map Suppliers".to_string(),
                perspective: "Supply".to_string(),
                section: String::new(),
            },
            Perspective {
                description: "Assess Risks".to_string(),
                perspective: "Risk".to_string(),
                section: "Risk".to_string(),
            },
        ]);
        let placements = planner.placements();
        assert_eq!(placements.len(), 1);
        assert_eq!(placements["Risk"], "Risk");
    }
}
