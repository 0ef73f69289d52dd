//! Transaction booking and the operational reminder it schedules when the
//! trade has a liquidation date.

use chrono::Duration;

use crate::api::{ApiClientError, CrmApi};
use crate::state::{AppState, SnackbarKind};
use crate::types::{
    ActivityPriority, ActivityStatus, ActivityType, NewActivity, NewTransaction, Transaction,
};

/// Book a transaction and, on success, best-effort schedule the resource
/// check two days ahead of liquidation.
pub async fn add_transaction<A: CrmApi + ?Sized>(
    api: &A,
    state: &mut AppState,
    input: NewTransaction,
) -> Result<Transaction, ApiClientError> {
    let created = match api.create_transaction(&input).await {
        Ok(created) => created,
        Err(err) => {
            state.show_snackbar(err.to_string(), SnackbarKind::Error);
            return Err(err);
        }
    };
    state.show_snackbar("Transação adicionada com sucesso!", SnackbarKind::Success);
    create_operational_reminder(api, state, &created).await;
    Ok(created)
}

/// The reminder for a booked transaction; `None` when there is no
/// liquidation date to remind about.
pub fn reminder_plan(transaction: &Transaction) -> Option<NewActivity> {
    let liquidation = transaction.liquidation_date?;
    let product = transaction
        .product
        .as_ref()
        .map(|p| p.description.clone())
        .unwrap_or_default();
    Some(NewActivity {
        title: format!("Verificar recursos para {product}"),
        kind: ActivityType::Operacional,
        client_id: Some(transaction.client_id),
        opportunity_id: None,
        assessor: Some("Sistema".into()),
        due_date: liquidation - Duration::days(2),
        priority: ActivityPriority::Alta,
        status: ActivityStatus::AFazer,
        notes: Some(format!(
            "Lembrar cliente {} sobre a liquidação de {} em {}.",
            transaction.client_name,
            format_brl(transaction.value),
            liquidation.format("%d/%m/%Y"),
        )),
    })
}

async fn create_operational_reminder<A: CrmApi + ?Sized>(
    api: &A,
    state: &mut AppState,
    transaction: &Transaction,
) {
    let Some(plan) = reminder_plan(transaction) else {
        return;
    };
    match api.create_activity(&plan).await {
        Ok(created) => {
            state.add_activity(created);
            state.show_snackbar(
                "Tarefa operacional criada automaticamente!",
                SnackbarKind::Success,
            );
        }
        Err(err) => {
            tracing::warn!(error = %err, "falha ao criar lembrete operacional");
        }
    }
}

/// `1234.5` → `R$ 1.234,50`.
pub fn format_brl(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::new();
    for (idx, digit) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}R$ {grouped},{fraction:02}")
}
