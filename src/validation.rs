//! Field rules for the gig wizard.
//!
//! Numeric fields arrive as text and are coerced before range checks; text
//! that does not parse as a number fails.

use std::fmt;
use thiserror::Error;

use crate::models::gigs::{FormValues, GigDraft};

pub const TITLE_CHARS: (usize, usize) = (10, 1000);
pub const DESCRIPTION_CHARS: (usize, usize) = (50, 10_000);
pub const MIN_PRICE: f64 = 0.0;
pub const MIN_DELIVERY_DAYS: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Title,
    Description,
    Category,
    DeliveryTime,
    Price,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Title => "title",
            Field::Description => "description",
            Field::Category => "category",
            Field::DeliveryTime => "deliveryTime",
            Field::Price => "price",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

fn check_length(field: Field, label: &str, value: &str, (min, max): (usize, usize)) -> Result<(), FieldError> {
    let len = value.chars().count();
    if len < min {
        return Err(FieldError::new(
            field,
            format!("{label} must be at least {min} characters"),
        ));
    }
    if len > max {
        return Err(FieldError::new(
            field,
            format!("{label} must not exceed {max} characters"),
        ));
    }
    Ok(())
}

pub fn validate_title(title: &str) -> Result<(), FieldError> {
    check_length(Field::Title, "Title", title, TITLE_CHARS)
}

pub fn validate_description(description: &str) -> Result<(), FieldError> {
    check_length(Field::Description, "Description", description, DESCRIPTION_CHARS)
}

pub fn validate_category(category: &str) -> Result<(), FieldError> {
    if category.trim().is_empty() {
        return Err(FieldError::new(Field::Category, "Please choose a category"));
    }
    Ok(())
}

fn coerce_number(field: Field, raw: &str) -> Result<f64, FieldError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| FieldError::new(field, "Please enter a number"))
}

pub fn validate_price(raw: &str) -> Result<f64, FieldError> {
    let price = coerce_number(Field::Price, raw)?;
    if price < MIN_PRICE {
        return Err(FieldError::new(
            Field::Price,
            "Price must be greater than or equal to 0",
        ));
    }
    Ok(price)
}

pub fn validate_delivery_time(raw: &str) -> Result<u32, FieldError> {
    let days = coerce_number(Field::DeliveryTime, raw)?;
    if days < f64::from(MIN_DELIVERY_DAYS) {
        return Err(FieldError::new(
            Field::DeliveryTime,
            "Delivery time must be at least 1 day",
        ));
    }
    if days.fract() != 0.0 || days > f64::from(u32::MAX) {
        return Err(FieldError::new(
            Field::DeliveryTime,
            "Delivery time must be a whole number of days",
        ));
    }
    Ok(days as u32)
}

/// Check one field of the draft.
pub fn validate_field(draft: &GigDraft, field: Field) -> Result<(), FieldError> {
    match field {
        Field::Title => validate_title(&draft.title),
        Field::Description => validate_description(&draft.description),
        Field::Category => validate_category(&draft.category),
        Field::DeliveryTime => validate_delivery_time(&draft.delivery_time).map(|_| ()),
        Field::Price => validate_price(&draft.price).map(|_| ()),
    }
}

/// Check every field, returning the typed values or all failures.
pub fn validate_all(draft: &GigDraft) -> Result<FormValues, Vec<FieldError>> {
    let mut errors = Vec::new();
    let mut keep = |result: Result<(), FieldError>| {
        if let Err(e) = result {
            errors.push(e);
        }
    };
    keep(validate_title(&draft.title));
    keep(validate_description(&draft.description));
    keep(validate_category(&draft.category));
    let delivery_time = validate_delivery_time(&draft.delivery_time);
    let price = validate_price(&draft.price);

    match (delivery_time, price) {
        (Ok(delivery_time), Ok(price)) if errors.is_empty() => Ok(FormValues {
            title: draft.title.clone(),
            description: draft.description.clone(),
            price,
            category: draft.category.trim().to_string(),
            delivery_time,
        }),
        (delivery_time, price) => {
            errors.extend(delivery_time.err());
            errors.extend(price.err());
            Err(errors)
        }
    }
}
