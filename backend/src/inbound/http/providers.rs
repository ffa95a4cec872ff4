//! Provider browsing and availability handlers.
//!
//! ```text
//! GET /providers
//! GET /providers/{provider_id}/day-availability?day=20&month=5&year=2020
//! GET /providers/{provider_id}/month-availability?month=5&year=2020
//! ```

use actix_web::{get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{ApiResult, Error};
use crate::inbound::http::schemas::{DayAvailabilityResponse, HourAvailabilityResponse, UserResponse};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_calendar_day, parse_calendar_month, parse_user_id,
};

const PROVIDER_ID: FieldName = FieldName::new("providerId");

/// Calendar day selector.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DayQuery {
    #[param(example = 20)]
    pub day: u32,
    #[param(example = 5)]
    pub month: u32,
    #[param(example = 2020)]
    pub year: i32,
}

/// Calendar month selector.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MonthQuery {
    #[param(example = 5)]
    pub month: u32,
    #[param(example = 2020)]
    pub year: i32,
}

/// Every provider except the signed-in user.
#[utoipa::path(
    get,
    path = "/providers",
    responses(
        (status = 200, description = "Providers", body = [UserResponse]),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["providers"],
    operation_id = "listProviders"
)]
#[get("/providers")]
pub async fn list_providers(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let user_id = session.require_user_id()?;
    let providers = state.providers.list_providers(&user_id).await?;
    Ok(web::Json(
        providers
            .into_iter()
            .map(|profile| UserResponse::new(profile, &state))
            .collect(),
    ))
}

/// Hour-by-hour availability of a provider on one day.
#[utoipa::path(
    get,
    path = "/providers/{provider_id}/day-availability",
    params(
        ("provider_id" = String, Path, description = "Provider user id"),
        DayQuery
    ),
    responses(
        (status = 200, description = "Working hours 8..=17", body = [HourAvailabilityResponse]),
        (status = 400, description = "Invalid provider id or date", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["providers"],
    operation_id = "providerDayAvailability"
)]
#[get("/providers/{provider_id}/day-availability")]
pub async fn day_availability(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    query: web::Query<DayQuery>,
) -> ApiResult<web::Json<Vec<HourAvailabilityResponse>>> {
    session.require_user_id()?;
    let provider_id = parse_user_id(&path, PROVIDER_ID)?;
    let DayQuery { day, month, year } = query.into_inner();
    let day = parse_calendar_day(year, month, day)?;
    let hours = state.availability.day_availability(&provider_id, day).await?;
    Ok(web::Json(hours.into_iter().map(Into::into).collect()))
}

/// Day-by-day availability of a provider over one month.
#[utoipa::path(
    get,
    path = "/providers/{provider_id}/month-availability",
    params(
        ("provider_id" = String, Path, description = "Provider user id"),
        MonthQuery
    ),
    responses(
        (status = 200, description = "One entry per calendar day", body = [DayAvailabilityResponse]),
        (status = 400, description = "Invalid provider id or month", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["providers"],
    operation_id = "providerMonthAvailability"
)]
#[get("/providers/{provider_id}/month-availability")]
pub async fn month_availability(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    query: web::Query<MonthQuery>,
) -> ApiResult<web::Json<Vec<DayAvailabilityResponse>>> {
    session.require_user_id()?;
    let provider_id = parse_user_id(&path, PROVIDER_ID)?;
    let month = parse_calendar_month(query.year, query.month)?;
    let days = state
        .availability
        .month_availability(&provider_id, month)
        .await?;
    Ok(web::Json(days.into_iter().map(Into::into).collect()))
}
