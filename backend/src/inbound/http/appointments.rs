//! Appointment booking and the provider's own schedule.
//!
//! ```text
//! POST /appointments {"providerId":"<uuid>","date":"2020-05-20T14:00:00Z"}
//! GET /appointments/me?day=20&month=5&year=2020
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::CreateAppointmentRequest;
use crate::domain::{ApiResult, Error, UserId};
use crate::inbound::http::providers::DayQuery;
use crate::inbound::http::schemas::{AppointmentEnvelope, AppointmentResponse};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_calendar_day, parse_rfc3339_timestamp, parse_user_id, required,
};

/// Request body for `POST /appointments`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRequest {
    #[schema(example = "7c9e6679-7425-40de-944b-e07fc1f90ae7")]
    pub provider_id: Option<String>,
    /// RFC 3339 timestamp; minutes and seconds are discarded.
    #[schema(example = "2020-05-20T14:00:00Z")]
    pub date: Option<String>,
}

fn parse_appointment_request(
    user_id: UserId,
    payload: AppointmentRequest,
) -> Result<CreateAppointmentRequest, Error> {
    let provider_field = FieldName::new("providerId");
    let date_field = FieldName::new("date");
    let provider_id = required(payload.provider_id, provider_field)?;
    let date = required(payload.date, date_field)?;
    Ok(CreateAppointmentRequest {
        user_id,
        provider_id: parse_user_id(&provider_id, provider_field)?,
        date: parse_rfc3339_timestamp(&date, date_field)?,
    })
}

/// Book an hour with a provider.
#[utoipa::path(
    post,
    path = "/appointments",
    request_body = AppointmentRequest,
    responses(
        (status = 200, description = "Appointment booked", body = AppointmentEnvelope),
        (status = 400, description = "Slot taken, in the past, outside 8-17 or with oneself", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["appointments"],
    operation_id = "createAppointment"
)]
#[post("/appointments")]
pub async fn create_appointment(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AppointmentRequest>,
) -> ApiResult<web::Json<AppointmentEnvelope>> {
    let user_id = session.require_user_id()?;
    let request = parse_appointment_request(user_id, payload.into_inner())?;
    let appointment = state.appointments.create_appointment(request).await?;
    Ok(web::Json(appointment.into()))
}

/// Appointments booked with the signed-in provider on one day.
#[utoipa::path(
    get,
    path = "/appointments/me",
    params(DayQuery),
    responses(
        (status = 200, description = "Schedule in booking order", body = [AppointmentResponse]),
        (status = 400, description = "Invalid date", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["appointments"],
    operation_id = "listProviderAppointments"
)]
#[get("/appointments/me")]
pub async fn list_provider_appointments(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<DayQuery>,
) -> ApiResult<web::Json<Vec<AppointmentResponse>>> {
    let provider_id = session.require_user_id()?;
    let DayQuery { day, month, year } = query.into_inner();
    let day = parse_calendar_day(year, month, day)?;
    let appointments = state
        .appointments_query
        .list_provider_appointments(&provider_id, day)
        .await?;
    Ok(web::Json(appointments.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Appointment, AppointmentId};
    use crate::inbound::http::test_utils::{TestPorts, signed_in_cookie, test_app};
    use crate::test_support::{at, fixture_now};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use chrono::NaiveDate;
    use rstest::rstest;
    use serde_json::{Value, json};

    const CUSTOMER: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
    const PROVIDER: &str = "7c9e6679-7425-40de-944b-e07fc1f90ae7";

    fn booked(hour: u32) -> Appointment {
        Appointment {
            id: AppointmentId::random(),
            provider_id: UserId::new(PROVIDER).expect("provider id"),
            user_id: UserId::new(CUSTOMER).expect("customer id"),
            date: at(2020, 5, 20, hour),
            created_at: fixture_now(),
            updated_at: fixture_now(),
        }
    }

    async fn call(
        ports: TestPorts,
        signed_in_as: &str,
        request: actix_test::TestRequest,
    ) -> (StatusCode, Value) {
        let app = actix_test::init_service(test_app(ports.into_state(), |cfg| {
            cfg.service(create_appointment)
                .service(list_provider_appointments);
        }))
        .await;
        let cookie = signed_in_cookie(&app, signed_in_as).await;
        let res = actix_test::call_service(&app, request.cookie(cookie).to_request()).await;
        let status = res.status();
        (status, actix_test::read_body_json(res).await)
    }

    #[actix_web::test]
    async fn booking_wraps_the_appointment() {
        let mut ports = TestPorts::default();
        ports
            .appointments
            .expect_create_appointment()
            .withf(|request| {
                request.user_id.as_ref() == CUSTOMER
                    && request.provider_id.as_ref() == PROVIDER
                    && request.date == at(2020, 5, 20, 14)
            })
            .times(1)
            .return_once(|_| Ok(booked(14)));

        let (status, body) = call(
            ports,
            CUSTOMER,
            actix_test::TestRequest::post()
                .uri("/appointments")
                .set_json(json!({"providerId": PROVIDER, "date": "2020-05-20T14:00:00Z"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["appointment"]["providerId"], PROVIDER);
        assert_eq!(body["appointment"]["date"], "2020-05-20T14:00:00Z");
    }

    #[actix_web::test]
    async fn domain_rejections_keep_their_message() {
        let mut ports = TestPorts::default();
        ports
            .appointments
            .expect_create_appointment()
            .return_once(|_| Err(Error::invalid_request("This appointment is already booked")));

        let (status, body) = call(
            ports,
            CUSTOMER,
            actix_test::TestRequest::post()
                .uri("/appointments")
                .set_json(json!({"providerId": PROVIDER, "date": "2020-05-20T14:00:00Z"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "This appointment is already booked");
    }

    #[rstest]
    #[case(json!({"date": "2020-05-20T14:00:00Z"}), "providerId", "missing_field")]
    #[case(json!({"providerId": PROVIDER}), "date", "missing_field")]
    #[case(json!({"providerId": "nope", "date": "2020-05-20T14:00:00Z"}), "providerId", "invalid_uuid")]
    #[case(json!({"providerId": PROVIDER, "date": "20/05/2020"}), "date", "invalid_timestamp")]
    #[actix_web::test]
    async fn malformed_bookings_are_rejected(
        #[case] payload: Value,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let (status, body) = call(
            TestPorts::default(),
            CUSTOMER,
            actix_test::TestRequest::post()
                .uri("/appointments")
                .set_json(payload),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["field"], field);
        assert_eq!(body["details"]["code"], code);
    }

    #[actix_web::test]
    async fn schedule_is_read_for_the_session_provider() {
        let mut ports = TestPorts::default();
        ports
            .appointments_query
            .expect_list_provider_appointments()
            .withf(|provider, day| {
                provider.as_ref() == PROVIDER
                    && *day == NaiveDate::from_ymd_opt(2020, 5, 20).expect("date")
            })
            .return_once(|_, _| Ok(vec![booked(9), booked(14)]));

        let (status, body) = call(
            ports,
            PROVIDER,
            actix_test::TestRequest::get().uri("/appointments/me?day=20&month=5&year=2020"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let hours: Vec<&str> = body
            .as_array()
            .expect("array")
            .iter()
            .filter_map(|item| item["date"].as_str())
            .collect();
        assert_eq!(hours, ["2020-05-20T09:00:00Z", "2020-05-20T14:00:00Z"]);
    }
}
