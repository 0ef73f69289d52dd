//! The pipeline board workflow: a card dropped on another column becomes a
//! proposed move that the user must confirm; confirming persists the stage
//! and, when the deal is won, fans out the onboarding tasks.

use chrono::{DateTime, Duration, Utc};

use crate::api::{ApiClientError, CrmApi};
use crate::state::{AppState, SnackbarKind};
use crate::types::{
    ActivityPriority, ActivityStatus, ActivityType, NewActivity, Opportunity, OpportunityStage,
};

/// A stage change awaiting confirmation. Nothing is persisted until
/// [`confirm_stage_move`] runs.
#[derive(Debug, Clone)]
pub struct StageMove {
    pub opportunity: Opportunity,
    pub new_stage: OpportunityStage,
}

impl StageMove {
    /// Dropping a card on its own column is a no-op: no prompt, no call.
    pub fn propose(opportunity: &Opportunity, target: OpportunityStage) -> Option<Self> {
        if opportunity.stage == target {
            return None;
        }
        Some(Self {
            opportunity: opportunity.clone(),
            new_stage: target,
        })
    }

    /// The confirmation question shown before anything is persisted.
    pub fn prompt(&self) -> String {
        format!(
            "Você tem certeza que deseja mover a oportunidade \"{}\" para \"{}\"?",
            self.opportunity.title, self.new_stage
        )
    }
}

/// Persist a confirmed move. Exactly one partial update is issued; a won
/// deal additionally triggers the onboarding fan-out. When the update
/// itself fails nothing else happens — the stage must not be assumed
/// changed.
pub async fn confirm_stage_move<A: CrmApi + ?Sized>(
    api: &A,
    state: &mut AppState,
    mv: StageMove,
) -> Result<Opportunity, ApiClientError> {
    let updated = match api
        .update_opportunity_stage(mv.opportunity.id, mv.new_stage)
        .await
    {
        Ok(updated) => updated,
        Err(err) => {
            state.show_snackbar(err.to_string(), SnackbarKind::Error);
            return Err(err);
        }
    };

    if mv.new_stage == OpportunityStage::Ganho {
        run_onboarding_fanout(api, state, &updated).await;
    }
    state.show_snackbar(
        format!("Oportunidade movida para {}!", mv.new_stage),
        SnackbarKind::Success,
    );
    Ok(updated)
}

/// The three follow-up tasks a freshly won deal generates, due +2, +5 and
/// +7 days out.
pub fn onboarding_plan(opportunity: &Opportunity, today: DateTime<Utc>) -> Vec<NewActivity> {
    let client_name = opportunity.client_name.as_str();
    vec![
        NewActivity {
            title: format!("Coletar Documentos KYC - {client_name}"),
            kind: ActivityType::Operacional,
            client_id: Some(opportunity.client_id),
            opportunity_id: None,
            assessor: opportunity.responsible.clone(),
            due_date: today + Duration::days(2),
            priority: ActivityPriority::Alta,
            status: ActivityStatus::AFazer,
            notes: Some(format!(
                "Início do processo de onboarding para a oportunidade: {}",
                opportunity.title
            )),
        },
        NewActivity {
            title: format!("Agendar Reunião de Boas-Vindas - {client_name}"),
            kind: ActivityType::Reuniao,
            client_id: Some(opportunity.client_id),
            opportunity_id: None,
            assessor: opportunity.responsible.clone(),
            due_date: today + Duration::days(5),
            priority: ActivityPriority::Media,
            status: ActivityStatus::AFazer,
            notes: None,
        },
        NewActivity {
            title: format!("Preparar plano de alocação inicial - {client_name}"),
            kind: ActivityType::Operacional,
            client_id: Some(opportunity.client_id),
            opportunity_id: None,
            assessor: opportunity.responsible.clone(),
            due_date: today + Duration::days(7),
            priority: ActivityPriority::Alta,
            status: ActivityStatus::AFazer,
            notes: None,
        },
    ]
}

/// Best-effort, sequential, not transactional: each create is attempted on
/// its own, a failure is logged and skipped, and the closing toast reports
/// the nominal count either way. Nothing deduplicates a repeated win, so
/// re-entering the stage produces a second set.
async fn run_onboarding_fanout<A: CrmApi + ?Sized>(
    api: &A,
    state: &mut AppState,
    opportunity: &Opportunity,
) {
    let plan = onboarding_plan(opportunity, Utc::now());
    let count = plan.len();
    for item in plan {
        match api.create_activity(&item).await {
            Ok(created) => state.add_activity(created),
            Err(err) => {
                tracing::warn!(error = %err, title = %item.title, "falha ao criar atividade de onboarding");
            }
        }
    }
    state.show_snackbar(
        format!("Workflow de onboarding criado! {count} atividades foram geradas."),
        SnackbarKind::Success,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn opportunity(stage: OpportunityStage) -> Opportunity {
        let now = Utc::now();
        Opportunity {
            id: Uuid::new_v4(),
            title: "Plano Previdência".into(),
            client_id: Uuid::new_v4(),
            client_name: "Maria Souza".into(),
            source: None,
            estimated_value: 150_000.0,
            stage,
            probability: 70,
            expected_close_date: None,
            responsible: Some("Carlos".into()),
            next_action: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn equal_stage_drop_is_not_proposed() {
        let opp = opportunity(OpportunityStage::Proposta);
        assert!(StageMove::propose(&opp, OpportunityStage::Proposta).is_none());
        assert!(StageMove::propose(&opp, OpportunityStage::Negociacao).is_some());
    }

    #[test]
    fn plan_offsets_and_shapes() {
        let opp = opportunity(OpportunityStage::Ganho);
        let today = Utc::now();
        let plan = onboarding_plan(&opp, today);
        assert_eq!(plan.len(), 3);

        assert!(plan[0].title.contains("KYC"));
        assert_eq!(plan[0].due_date, today + Duration::days(2));
        assert_eq!(plan[0].priority, ActivityPriority::Alta);
        assert_eq!(plan[0].kind, ActivityType::Operacional);

        assert!(plan[1].title.contains("Boas-Vindas"));
        assert_eq!(plan[1].due_date, today + Duration::days(5));
        assert_eq!(plan[1].priority, ActivityPriority::Media);
        assert_eq!(plan[1].kind, ActivityType::Reuniao);

        assert!(plan[2].title.contains("alocação inicial"));
        assert_eq!(plan[2].due_date, today + Duration::days(7));
        assert_eq!(plan[2].priority, ActivityPriority::Alta);
        assert_eq!(plan[2].kind, ActivityType::Operacional);

        for item in &plan {
            assert_eq!(item.client_id, Some(opp.client_id));
            assert_eq!(item.assessor.as_deref(), Some("Carlos"));
            assert_eq!(item.status, ActivityStatus::AFazer);
        }
    }

    #[test]
    fn prompt_names_title_and_target() {
        let opp = opportunity(OpportunityStage::Negociacao);
        let mv = StageMove::propose(&opp, OpportunityStage::Ganho).unwrap();
        assert_eq!(
            mv.prompt(),
            "Você tem certeza que deseja mover a oportunidade \"Plano Previdência\" para \"Ganho\"?"
        );
    }
}
