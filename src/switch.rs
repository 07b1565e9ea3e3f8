//! Language switch service.
//!
//! Single-shot state machine behind `/language-switch`: check the method,
//! check the `lang` field, validate it against the supported set, then store
//! it. Failing paths never touch the session.

use crate::i18n::{Language, LanguagePreferences, PreferenceError};
use crate::session::SessionState;
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{error, info, warn};

/// Form payload of a switch request.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SwitchForm {
    pub lang: Option<String>,
}

impl SwitchForm {
    /// Build from decoded form fields in body order. A repeated `lang`
    /// field takes its last value; other fields are ignored.
    pub fn from_fields<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let lang = fields
            .into_iter()
            .filter(|(name, _)| name == "lang")
            .map(|(_, value)| value)
            .last();

        Self { lang }
    }
}

/// Outcome classes of a switch request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchStatus {
    Ok,
    BadRequest,
    MethodNotAllowed,
    InternalError,
}

impl SwitchStatus {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SwitchStatus::Ok => StatusCode::OK,
            SwitchStatus::BadRequest => StatusCode::BAD_REQUEST,
            SwitchStatus::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            SwitchStatus::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON reply of the switch endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwitchResponse {
    #[serde(skip)]
    pub status: SwitchStatus,

    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SwitchResponse {
    fn ok(language: Language) -> Self {
        Self {
            status: SwitchStatus::Ok,
            success: true,
            language: Some(language),
            message: Some("Language updated successfully.".to_string()),
            error: None,
        }
    }

    fn failure(status: SwitchStatus, error: impl Into<String>) -> Self {
        Self {
            status,
            success: false,
            language: None,
            message: None,
            error: Some(error.into()),
        }
    }
}

impl IntoResponse for SwitchResponse {
    fn into_response(self) -> Response {
        let status = self.status.status_code();
        let mut response = (status, Json(&self)).into_response();

        if self.status == SwitchStatus::MethodNotAllowed {
            response
                .headers_mut()
                .insert(header::ALLOW, header::HeaderValue::from_static("POST"));
        }

        response
    }
}

/// Run a switch request against the visitor's preferences.
pub fn process_language_switch<S: SessionState>(
    method: &Method,
    form: &SwitchForm,
    preferences: &mut LanguagePreferences<S>,
) -> SwitchResponse {
    if *method != Method::POST {
        warn!("Language switch rejected: method {} not allowed", method);
        return SwitchResponse::failure(
            SwitchStatus::MethodNotAllowed,
            "Method not allowed. Only POST requests are accepted.",
        );
    }

    let code = match form.lang.as_deref() {
        Some(code) if !code.is_empty() => code,
        _ => {
            return SwitchResponse::failure(
                SwitchStatus::BadRequest,
                "Language parameter is required.",
            );
        }
    };

    if Language::from_code(code).is_err() {
        warn!("Invalid language code attempted: {:?}", code);
        return SwitchResponse::failure(
            SwitchStatus::BadRequest,
            "Invalid language code. Must be \"es\" or \"en\".",
        );
    }

    match preferences.set_language(code) {
        Ok(language) => {
            info!("Language switched to {}", language);
            SwitchResponse::ok(language)
        }
        Err(PreferenceError::InvalidCode(_)) => SwitchResponse::failure(
            SwitchStatus::BadRequest,
            "Invalid language code. Must be \"es\" or \"en\".",
        ),
        Err(e @ PreferenceError::Storage(_)) => {
            error!("Language switch failed: {}", e);
            SwitchResponse::failure(
                SwitchStatus::InternalError,
                "Failed to update language preference.",
            )
        }
    }
}
