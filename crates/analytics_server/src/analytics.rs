//! Analytics API endpoints.

use api_types::{
    summary::{Summary, SummaryFilters, SummaryResponse},
    trend::{PercentChange, Trend, TrendPeriod, TrendResponse},
};
use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::{
    ServerError,
    client::{StoreClient, StoreClientError},
    query::{self, RawSummaryParams, RawTrendParams},
    server::AnalyticsState,
    summary::{category_total_cents, summarize},
};

async fn summary_for_filters(
    client: &StoreClient,
    filters: &SummaryFilters,
) -> Result<Summary, StoreClientError> {
    let expenses = client.fetch_expenses(filters).await?;
    Ok(summarize(&expenses))
}

pub async fn get_summary(
    State(state): State<AnalyticsState>,
    Query(params): Query<RawSummaryParams>,
) -> Result<Json<SummaryResponse>, ServerError> {
    let filters = query::parse_summary_filters(&params)?;
    tracing::debug!("calculating summary with filters {filters:?}");

    let data = summary_for_filters(&state.client, &filters).await?;

    Ok(Json(SummaryResponse {
        success: true,
        filters,
        data,
    }))
}

pub async fn category_trend(
    State(state): State<AnalyticsState>,
    Path(category): Path<String>,
    Query(params): Query<RawTrendParams>,
) -> Result<Json<TrendResponse>, ServerError> {
    let ((from1, to1), (from2, to2)) = query::parse_trend_ranges(&params)?;

    let filters1 = SummaryFilters {
        from: Some(from1),
        to: Some(to1),
        category: Some(category.clone()),
    };
    let filters2 = SummaryFilters {
        from: Some(from2),
        to: Some(to2),
        category: Some(category.clone()),
    };

    // Both period summaries are fetched concurrently; either failure fails
    // the whole trend.
    let (summary1, summary2) = tokio::try_join!(
        summary_for_filters(&state.client, &filters1),
        summary_for_filters(&state.client, &filters2),
    )?;

    let total1 = category_total_cents(&summary1, &category);
    let total2 = category_total_cents(&summary2, &category);
    let change = total2 - total1;

    let percent_change = if total1 > 0 {
        let percent = (change as f64 / total1 as f64) * 100.0;
        PercentChange::Percent(format!("{percent:.2}"))
    } else {
        PercentChange::zero_baseline()
    };

    Ok(Json(TrendResponse {
        success: true,
        data: Trend {
            category,
            period1: TrendPeriod {
                from: from1,
                to: to1,
                total: total1 as f64 / 100.0,
            },
            period2: TrendPeriod {
                from: from2,
                to: to2,
                total: total2 as f64 / 100.0,
            },
            change: change as f64 / 100.0,
            percent_change,
        },
    }))
}
