//! Field completeness predicates, one per wizard step.
//!
//! Each predicate answers "does this record hold everything the step's form
//! asks for" without consulting any other step — ordering between steps is
//! the progress tracker's job. Predicates are total and side-effect-free:
//! an absent or malformed field is simply "not satisfied", never an error.

use crate::steps::Step;
use crate::text::{is_blank, is_placeholder_title, rich_text_is_blank};
use crate::types::{Simulation, SimulationTask};

/// Whether the record satisfies one step's required fields.
///
/// `Review` always reports false: it is the terminal manual step and never
/// auto-completes.
pub fn step_fields_complete(sim: &Simulation, step: Step) -> bool {
    match step {
        Step::Metadata => metadata_complete(sim),
        Step::Outcomes => outcomes_complete(sim),
        Step::Tasks => tasks_complete(sim),
        Step::Assessment => assessment_complete(sim),
        Step::Branding => branding_complete(sim),
        Step::Certification => certification_complete(sim),
        Step::Visibility => sim.visibility.is_some(),
        Step::Analytics => sim.analytics_viewed(),
        Step::Review => false,
    }
}

/// A task holds real content rather than the builder's untouched scaffold:
/// a genuine title, or any introduction or instructions text.
pub fn task_is_meaningful(task: &SimulationTask) -> bool {
    let titled = task
        .title
        .as_deref()
        .is_some_and(|t| !t.trim().is_empty() && !is_placeholder_title(t));

    titled
        || !is_blank(task.introduction.as_deref())
        || !is_blank(task.instructions.as_deref())
}

fn metadata_complete(sim: &Simulation) -> bool {
    !is_blank(sim.title.as_deref())
        && !is_blank(sim.short_description.as_deref())
        && !is_blank(sim.description.as_deref())
        && !is_blank(sim.industry.as_deref())
        && !is_blank(sim.target_role.as_deref())
        && !is_blank(sim.program_type.as_deref())
}

fn outcomes_complete(sim: &Simulation) -> bool {
    !sim.learning_outcomes.is_empty() && !sim.simulation_skills.is_empty()
}

fn tasks_complete(sim: &Simulation) -> bool {
    !sim.simulation_tasks.is_empty() && sim.simulation_tasks.iter().any(task_is_meaningful)
}

fn assessment_complete(sim: &Simulation) -> bool {
    !is_blank(sim.duration.as_deref())
        && !is_blank(sim.difficulty_level.as_deref())
        && !is_blank(sim.target_audience.as_deref())
        && !rich_text_is_blank(sim.grading_criteria.as_deref())
}

fn branding_complete(sim: &Simulation) -> bool {
    !is_blank(sim.company_logo_url.as_deref())
        && !is_blank(sim.banner_url.as_deref())
        && !rich_text_is_blank(sim.about_company.as_deref())
        && !rich_text_is_blank(sim.why_work_here.as_deref())
}

fn certification_complete(sim: &Simulation) -> bool {
    !is_blank(sim.certificate_director_name.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SkillRef;

    fn task(title: &str, introduction: &str, instructions: &str) -> SimulationTask {
        SimulationTask {
            title: Some(title.to_string()),
            introduction: Some(introduction.to_string()),
            instructions: Some(instructions.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_record_satisfies_nothing() {
        let sim = Simulation::new("sim-1");
        for step in Step::ALL {
            assert!(
                !step_fields_complete(&sim, step),
                "empty record satisfied {step}"
            );
        }
    }

    #[test]
    fn test_metadata_requires_every_field() {
        let mut sim = Simulation::new("sim-1");
        sim.title = Some("Treasury Analyst Simulation".into());
        sim.short_description = Some("Model a cash desk".into());
        sim.description = Some("A week on the treasury desk".into());
        sim.industry = Some("Finance".into());
        sim.target_role = Some("Analyst".into());
        assert!(!step_fields_complete(&sim, Step::Metadata));

        sim.program_type = Some("self_paced".into());
        assert!(step_fields_complete(&sim, Step::Metadata));

        sim.industry = Some("   ".into());
        assert!(!step_fields_complete(&sim, Step::Metadata));
    }

    #[test]
    fn test_outcomes_requires_both_lists() {
        let mut sim = Simulation::new("sim-1");
        sim.learning_outcomes = vec!["Read a balance sheet".into()];
        assert!(!step_fields_complete(&sim, Step::Outcomes));

        sim.simulation_skills = vec![SkillRef {
            skill_name: "Excel".into(),
        }];
        assert!(step_fields_complete(&sim, Step::Outcomes));
    }

    #[test]
    fn test_placeholder_only_tasks_do_not_count() {
        let mut sim = Simulation::new("sim-1");
        sim.simulation_tasks = vec![task("New Task 1", "", "")];
        assert!(!step_fields_complete(&sim, Step::Tasks));

        // Any real content flips the task to meaningful.
        sim.simulation_tasks = vec![task("New Task 1", "Do the thing", "")];
        assert!(step_fields_complete(&sim, Step::Tasks));

        sim.simulation_tasks = vec![task("Forecast Q3 revenue", "", "")];
        assert!(step_fields_complete(&sim, Step::Tasks));
    }

    #[test]
    fn test_task_meaningfulness_edges() {
        assert!(!task_is_meaningful(&task("New Task 12", "", "  ")));
        assert!(task_is_meaningful(&task("New Task 12", "", "Open the ledger")));
        assert!(!task_is_meaningful(&SimulationTask::default()));
    }

    #[test]
    fn test_rich_text_groups_reject_editor_husk() {
        let mut sim = Simulation::new("sim-1");
        sim.duration = Some("4-6 hours".into());
        sim.difficulty_level = Some("intermediate".into());
        sim.target_audience = Some("Undergraduates".into());
        sim.grading_criteria = Some("<p><br></p>".into());
        assert!(!step_fields_complete(&sim, Step::Assessment));

        sim.grading_criteria = Some("<p>Rubric: accuracy 60%, clarity 40%</p>".into());
        assert!(step_fields_complete(&sim, Step::Assessment));
    }

    #[test]
    fn test_visibility_any_variant_counts() {
        use crate::types::Visibility;

        let mut sim = Simulation::new("sim-1");
        assert!(!step_fields_complete(&sim, Step::Visibility));

        sim.visibility = Some(Visibility::Draft);
        assert!(step_fields_complete(&sim, Step::Visibility));
    }

    #[test]
    fn test_review_never_auto_completes() {
        let mut sim = Simulation::new("sim-1");
        sim.mark_analytics_viewed();
        assert!(!step_fields_complete(&sim, Step::Review));
    }
}
