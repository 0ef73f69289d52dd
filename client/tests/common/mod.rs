use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use client::api::{ApiClientError, CrmApi};
use client::types::{
    Activity, ClientSummary, NewActivity, NewOpportunity, NewTransaction, Opportunity,
    OpportunityStage, Transaction,
};
use uuid::Uuid;

/// In-memory stand-in for the HTTP API: records every call and can be told
/// to fail specific ones.
pub struct FakeApi {
    pub opportunity: Opportunity,
    pub update_calls: Mutex<Vec<(Uuid, OpportunityStage)>>,
    pub activity_attempts: Mutex<Vec<NewActivity>>,
    pub fail_update: bool,
    pub fail_transaction: bool,
    pub fail_activity_titles_containing: Vec<String>,
}

impl FakeApi {
    pub fn new(opportunity: Opportunity) -> Self {
        Self {
            opportunity,
            update_calls: Mutex::new(Vec::new()),
            activity_attempts: Mutex::new(Vec::new()),
            fail_update: false,
            fail_transaction: false,
            fail_activity_titles_containing: Vec::new(),
        }
    }

    pub fn failing_update(mut self) -> Self {
        self.fail_update = true;
        self
    }

    pub fn failing_transaction(mut self) -> Self {
        self.fail_transaction = true;
        self
    }

    pub fn failing_activities_containing(mut self, needle: &str) -> Self {
        self.fail_activity_titles_containing.push(needle.to_string());
        self
    }

    pub fn update_count(&self) -> usize {
        self.update_calls.lock().unwrap().len()
    }

    pub fn attempted_activities(&self) -> Vec<NewActivity> {
        self.activity_attempts.lock().unwrap().clone()
    }
}

pub fn sample_opportunity(stage: OpportunityStage) -> Opportunity {
    let now = Utc::now();
    Opportunity {
        id: Uuid::new_v4(),
        title: "Fundo Multimercado".into(),
        client_id: Uuid::new_v4(),
        client_name: "João Pereira".into(),
        source: Some("Indicação".into()),
        estimated_value: 250_000.0,
        stage,
        probability: 60,
        expected_close_date: None,
        responsible: Some("Ana".into()),
        next_action: Some("Enviar proposta".into()),
        created_at: now,
        updated_at: now,
    }
}

fn activity_from(input: &NewActivity) -> Activity {
    let now = Utc::now();
    Activity {
        id: Uuid::new_v4(),
        title: input.title.clone(),
        kind: input.kind,
        client_id: input.client_id,
        opportunity_id: input.opportunity_id,
        assessor: input.assessor.clone(),
        guests: serde_json::Value::Array(Vec::new()),
        location: None,
        due_date: input.due_date,
        priority: input.priority,
        status: input.status,
        notes: input.notes.clone(),
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl CrmApi for FakeApi {
    async fn list_clients(&self) -> Result<Vec<ClientSummary>, ApiClientError> {
        Ok(Vec::new())
    }

    async fn list_opportunities(&self) -> Result<Vec<Opportunity>, ApiClientError> {
        Ok(vec![self.opportunity.clone()])
    }

    async fn list_activities(&self) -> Result<Vec<Activity>, ApiClientError> {
        Ok(Vec::new())
    }

    async fn create_opportunity(
        &self,
        input: &NewOpportunity,
    ) -> Result<Opportunity, ApiClientError> {
        let mut created = self.opportunity.clone();
        created.id = Uuid::new_v4();
        created.title = input.title.clone();
        Ok(created)
    }

    async fn update_opportunity_stage(
        &self,
        id: Uuid,
        stage: OpportunityStage,
    ) -> Result<Opportunity, ApiClientError> {
        self.update_calls.lock().unwrap().push((id, stage));
        if self.fail_update {
            return Err(ApiClientError::Api("Oportunidade não encontrada.".into()));
        }
        let mut updated = self.opportunity.clone();
        updated.id = id;
        updated.stage = stage;
        updated.updated_at = Utc::now();
        Ok(updated)
    }

    async fn create_activity(&self, input: &NewActivity) -> Result<Activity, ApiClientError> {
        self.activity_attempts.lock().unwrap().push(input.clone());
        if self
            .fail_activity_titles_containing
            .iter()
            .any(|needle| input.title.contains(needle))
        {
            return Err(ApiClientError::Api("Erro ao criar atividade.".into()));
        }
        Ok(activity_from(input))
    }

    async fn create_transaction(
        &self,
        input: &NewTransaction,
    ) -> Result<Transaction, ApiClientError> {
        if self.fail_transaction {
            return Err(ApiClientError::Api("Erro ao criar transação.".into()));
        }
        Ok(Transaction {
            id: Uuid::new_v4(),
            client_id: input.client_id.unwrap_or_else(Uuid::new_v4),
            client_name: "João Pereira".into(),
            kind: input.kind.clone(),
            product: input.product.clone(),
            value: input.value.unwrap_or(0.0),
            unit_value: input.unit_value,
            quantity: input.quantity,
            reservation_date: input.reservation_date,
            liquidation_date: input.liquidation_date,
            timestamp: input.timestamp.unwrap_or_else(Utc::now),
            status: input.status.clone(),
            institution: input.institution.clone(),
            doc_ref: input.doc_ref.clone(),
        })
    }
}
