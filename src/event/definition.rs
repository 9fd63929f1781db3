//! Event definitions and boundary validation
//!
//! Raw definitions arrive in the original wire format (one JSON array per
//! phase, Portuguese field names) and are validated once, here, into
//! immutable [`Event`] values. Consumers never see a half-formed event.

use std::collections::HashMap;

use serde::Deserialize;

use crate::attribute::Attribute;
use crate::error::{LifeSimError, Result};

/// Raw event definition as found in phase content files.
///
/// At least one of `(efeitos + atributo)` or `efeitos_multiplos` must be
/// populated for the entry to validate.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub descricao: String,
    #[serde(default)]
    pub opcoes: Vec<String>,
    #[serde(default)]
    pub efeitos: Option<Vec<i32>>,
    #[serde(default)]
    pub atributo: Option<String>,
    #[serde(default, rename = "efeitosMultiplos")]
    pub efeitos_multiplos: Option<HashMap<String, i32>>,
}

/// Effect payload of a validated event.
#[derive(Debug, Clone, PartialEq)]
pub enum EventEffect {
    /// One attribute, one delta per option; the chosen option picks the
    /// delta.
    Single {
        attribute: Attribute,
        deltas: Vec<i32>,
    },
    /// A map of attribute tokens to deltas, applied in full regardless of
    /// the chosen option. Unresolvable keys survive to dispatch time,
    /// where they are skipped individually.
    Multi(HashMap<String, i32>),
}

/// A validated, immutable event.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: String,
    pub description: String,
    pub options: Vec<String>,
    pub effect: EventEffect,
}

impl Event {
    /// Validate a raw definition.
    ///
    /// Rules: non-empty id and description, at least one option, and one
    /// populated effect path whose attribute name(s) resolve. A multi
    /// map needs at least one resolvable key.
    pub fn validate(raw: RawEvent) -> Result<Event> {
        if raw.id.trim().is_empty() {
            return Err(LifeSimError::InvalidEvent("missing id".to_string()));
        }
        if raw.descricao.trim().is_empty() {
            return Err(LifeSimError::InvalidEvent(format!(
                "event {}: missing description",
                raw.id
            )));
        }
        if raw.opcoes.is_empty() {
            return Err(LifeSimError::InvalidEvent(format!(
                "event {}: no options",
                raw.id
            )));
        }

        let effect = if let Some(multi) = raw.efeitos_multiplos.filter(|m| !m.is_empty()) {
            if !multi.keys().any(|k| k.parse::<Attribute>().is_ok()) {
                return Err(LifeSimError::InvalidEvent(format!(
                    "event {}: no resolvable attribute in multi-effect map",
                    raw.id
                )));
            }
            EventEffect::Multi(multi)
        } else {
            let deltas = raw.efeitos.filter(|e| !e.is_empty()).ok_or_else(|| {
                LifeSimError::InvalidEvent(format!("event {}: no effects declared", raw.id))
            })?;
            let token = raw.atributo.as_deref().unwrap_or_default();
            let attribute = token.parse::<Attribute>().map_err(|_| {
                LifeSimError::InvalidEvent(format!(
                    "event {}: unresolvable attribute {:?}",
                    raw.id, token
                ))
            })?;
            EventEffect::Single { attribute, deltas }
        };

        Ok(Event {
            id: raw.id,
            description: raw.descricao,
            options: raw.opcoes,
            effect,
        })
    }
}
