//! Expenses API endpoints.

use api_types::expense::{
    ExpenseListResponse, ExpenseNew, ExpenseResponse, ExpenseUpdate, ExpenseView,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    ServerError,
    query::{self, RawListParams},
    server::ServerState,
};

fn map_category(category: store::Category) -> api_types::Category {
    match category {
        store::Category::Food => api_types::Category::Food,
        store::Category::Transport => api_types::Category::Transport,
        store::Category::Shopping => api_types::Category::Shopping,
        store::Category::Bills => api_types::Category::Bills,
        store::Category::Other => api_types::Category::Other,
    }
}

fn view(record: store::Expense) -> ExpenseView {
    ExpenseView {
        id: record.id,
        title: record.title,
        amount: record.amount.to_amount(),
        category: map_category(record.category),
        date: record.date,
        notes: record.notes,
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}

fn parse_id(id: &str) -> Result<Uuid, ServerError> {
    Uuid::parse_str(id).map_err(|_| ServerError::InvalidId(id.to_string()))
}

pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<RawListParams>,
) -> Result<Json<ExpenseListResponse>, ServerError> {
    let filter = query::parse_filter(&params)?;
    let records = state.store.list(&filter).await?;

    let data: Vec<ExpenseView> = records.into_iter().map(view).collect();
    Ok(Json(ExpenseListResponse {
        success: true,
        count: data.len(),
        data,
    }))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<ExpenseResponse>, ServerError> {
    let id = parse_id(&id)?;
    let record = state.store.get(id).await?;

    Ok(Json(ExpenseResponse {
        success: true,
        message: None,
        data: view(record),
    }))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseNew>,
) -> Result<(StatusCode, Json<ExpenseResponse>), ServerError> {
    let record = state
        .store
        .create(store::CreateExpense {
            title: payload.title,
            amount: payload.amount,
            category: payload.category,
            date: payload.date,
            notes: payload.notes,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ExpenseResponse {
            success: true,
            message: Some("Expense created successfully".to_string()),
            data: view(record),
        }),
    ))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ExpenseUpdate>,
) -> Result<Json<ExpenseResponse>, ServerError> {
    let id = parse_id(&id)?;
    let record = state
        .store
        .update(
            id,
            store::UpdateExpense {
                title: payload.title,
                amount: payload.amount,
                category: payload.category,
                date: payload.date,
                notes: payload.notes,
            },
        )
        .await?;

    Ok(Json(ExpenseResponse {
        success: true,
        message: Some("Expense updated successfully".to_string()),
        data: view(record),
    }))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<ExpenseResponse>, ServerError> {
    let id = parse_id(&id)?;
    let record = state.store.delete(id).await?;

    Ok(Json(ExpenseResponse {
        success: true,
        message: Some("Expense deleted successfully".to_string()),
        data: view(record),
    }))
}
