use thiserror::Error;
use tracing::{error, info, warn};

use crate::{
    applications::{
        dto::{ApplicationForm, Choice, HairType, OptionSet, Race, Size},
        repo_types::{Application, NewApplication},
    },
    error::{AppError, ValidationError},
    store::{ApplicationStore, StoreError},
};

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<SubmitError> for AppError {
    fn from(e: SubmitError) -> Self {
        match e {
            SubmitError::Invalid(v) => AppError::Validation(v),
            SubmitError::Store(s) => AppError::Store(s),
        }
    }
}

fn missing_fields(form: &ApplicationForm) -> Vec<&'static str> {
    let required = [
        ("discord_username", &form.discord_username),
        ("discord_id", &form.discord_id),
        ("name", &form.name),
        ("age", &form.age),
        ("size", &form.size),
        ("race", &form.race),
        ("hair_type", &form.hair_type),
        ("why_esex", &form.why_esex),
        ("height", &form.height),
        ("weight", &form.weight),
    ];
    required
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
}

fn unknown(field: &'static str, value: &str) -> ValidationError {
    ValidationError::UnknownOption {
        field,
        value: value.to_string(),
    }
}

/// Leading integer of `raw`, ignoring leading whitespace and anything after
/// the digits: `"24.5"` and `"24abc"` both give 24.
fn leading_integer(raw: &str) -> Option<i32> {
    let s = raw.trim_start();
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digits_len = s[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    s[..sign_len + digits_len].parse().ok()
}

/// Checks required fields and resolves the form into a storable row.
pub fn validate(form: &ApplicationForm) -> Result<NewApplication, ValidationError> {
    let missing = missing_fields(form);
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    let age = leading_integer(&form.age).ok_or(ValidationError::InvalidAge)?;

    let size = Size::parse(&form.size).ok_or_else(|| unknown("size", &form.size))?;
    let race = Choice::<Race>::from_form(&form.race, &form.race_other)
        .ok_or_else(|| unknown("race", &form.race))?;
    let hair_type = Choice::<HairType>::from_form(&form.hair_type, &form.hair_type_other)
        .ok_or_else(|| unknown("hair_type", &form.hair_type))?;

    Ok(NewApplication {
        discord_username: form.discord_username.clone(),
        discord_id: form.discord_id.clone(),
        name: form.name.clone(),
        age,
        size: size.value().to_string(),
        race: race.resolve(),
        hair_type: hair_type.resolve(),
        why_esex: form.why_esex.clone(),
        height: form.height.clone(),
        weight: form.weight.clone(),
    })
}

/// Validates and issues exactly one create request. Nothing is sent when
/// validation fails.
pub async fn submit(
    store: &dyn ApplicationStore,
    form: &ApplicationForm,
) -> Result<Application, SubmitError> {
    let new = validate(form).map_err(|e| {
        warn!(error = %e, "application rejected");
        e
    })?;

    match store.create(new).await {
        Ok(app) => {
            info!(application_id = %app.id, "application submitted");
            Ok(app)
        }
        Err(e) => {
            error!(error = %e, "error submitting application");
            Err(e.into())
        }
    }
}

/// All applications, newest first.
pub async fn list_applications(store: &dyn ApplicationStore) -> Result<Vec<Application>, StoreError> {
    let mut apps = store.list_recent().await.map_err(|e| {
        error!(error = %e, "error loading applications");
        e
    })?;
    apps.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(apps)
}
