use crate::error::Result;
use crate::providers::tencent_cos::{
    CosAbortIncompleteMultipartUpload, CosExpiration, CosLifecycleConfiguration,
    CosLifecycleFilter, CosLifecycleRule, CosNoncurrentVersion, CosTransition, PROVIDER_NAME,
};
use crate::types::{
    AbortIncompleteUpload, Expiration, LifecycleFilter, LifecycleRule, NoncurrentExpiration,
    NoncurrentTransition, Transition,
};

use super::{STATUS_ENABLED, parse_date, render_date, required, required_class, rule_id};

/// Abstract rules to a COS lifecycle configuration.
///
/// COS tolerates a missing filter (the rule covers the whole bucket) and needs
/// `days` on an expiration.
pub fn to_cos_lifecycle(rules: &[LifecycleRule]) -> Result<CosLifecycleConfiguration> {
    let rules = rules
        .iter()
        .enumerate()
        .map(|(index, rule)| to_cos_rule(index, rule))
        .collect::<Result<Vec<_>>>()?;
    Ok(CosLifecycleConfiguration { rules })
}

fn to_cos_rule(index: usize, rule: &LifecycleRule) -> Result<CosLifecycleRule> {
    let p = PROVIDER_NAME;
    let id = rule_id(p, index, rule)?;

    let filter = rule
        .filter
        .as_ref()
        .and_then(|f| f.prefix.clone())
        .map(|prefix| CosLifecycleFilter { prefix });

    let expiration = match &rule.expiration {
        Some(e) => Some(CosExpiration {
            days: Some(required(p, index, "expiration.days", e.days)?),
            date: e.date.map(render_date),
            expired_object_delete_marker: e.expired_object_delete_marker,
        }),
        None => None,
    };

    let noncurrent_version_expiration = match &rule.noncurrent_version_expiration {
        Some(e) => Some(CosNoncurrentVersion {
            noncurrent_days: required(p, index, "noncurrent_version_expiration.days", e.days)?,
            storage_class: None,
        }),
        None => None,
    };

    let mut transitions = Vec::new();
    if let Some(t) = &rule.transition {
        transitions.push(CosTransition {
            days: required(p, index, "transition.days", t.days)?,
            storage_class: required_class(
                p,
                index,
                "transition.storage_class",
                t.storage_class.as_ref(),
            )?,
        });
    }

    let mut noncurrent_version_transitions = Vec::new();
    if let Some(t) = &rule.noncurrent_version_transition {
        noncurrent_version_transitions.push(CosNoncurrentVersion {
            noncurrent_days: required(p, index, "noncurrent_version_transition.days", t.days)?,
            storage_class: Some(required_class(
                p,
                index,
                "noncurrent_version_transition.storage_class",
                t.storage_class.as_ref(),
            )?),
        });
    }

    let abort_incomplete_multipart_upload = match &rule.abort_incomplete_multipart_upload {
        Some(a) => Some(CosAbortIncompleteMultipartUpload {
            days_after_initiation: required(
                p,
                index,
                "abort_incomplete_multipart_upload.days_after_initiation",
                a.days_after_initiation,
            )?,
        }),
        None => None,
    };

    Ok(CosLifecycleRule {
        id,
        filter,
        status: STATUS_ENABLED.to_string(),
        expiration,
        transitions,
        noncurrent_version_expiration,
        noncurrent_version_transitions,
        abort_incomplete_multipart_upload,
    })
}

/// COS rules back to abstract rules.
///
/// The abstract model holds one transition of each kind; extra native
/// transitions are dropped with a warning.
pub fn from_cos_rules(rules: &[CosLifecycleRule]) -> Result<Vec<LifecycleRule>> {
    rules.iter().map(from_cos_rule).collect()
}

fn from_cos_rule(rule: &CosLifecycleRule) -> Result<LifecycleRule> {
    if rule.transitions.len() > 1 || rule.noncurrent_version_transitions.len() > 1 {
        log::warn!(
            "[{PROVIDER_NAME}] lifecycle rule '{}' has several transitions, keeping the first",
            rule.id
        );
    }

    let expiration = match &rule.expiration {
        Some(e) => Some(Expiration {
            days: e.days,
            date: e
                .date
                .as_deref()
                .map(|d| parse_date(PROVIDER_NAME, d))
                .transpose()?,
            expired_object_delete_marker: e.expired_object_delete_marker,
        }),
        None => None,
    };

    Ok(LifecycleRule {
        id: Some(rule.id.clone()),
        filter: rule.filter.as_ref().map(|f| LifecycleFilter {
            prefix: Some(f.prefix.clone()),
        }),
        expiration,
        noncurrent_version_expiration: rule.noncurrent_version_expiration.as_ref().map(|e| {
            NoncurrentExpiration {
                days: Some(e.noncurrent_days),
            }
        }),
        transition: rule.transitions.first().map(|t| Transition {
            days: Some(t.days),
            storage_class: Some(t.storage_class.clone()),
        }),
        noncurrent_version_transition: rule.noncurrent_version_transitions.first().map(|t| {
            NoncurrentTransition {
                days: Some(t.noncurrent_days),
                storage_class: t.storage_class.clone(),
            }
        }),
        abort_incomplete_multipart_upload: rule.abort_incomplete_multipart_upload.as_ref().map(
            |a| AbortIncompleteUpload {
                days_after_initiation: Some(a.days_after_initiation),
            },
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;

    fn expire_logs() -> LifecycleRule {
        LifecycleRule {
            filter: Some(LifecycleFilter {
                prefix: Some("hg/".into()),
            }),
            expiration: Some(Expiration {
                days: Some(5),
                ..Default::default()
            }),
            ..LifecycleRule::with_id("model-cleanup")
        }
    }

    fn abort_uploads() -> LifecycleRule {
        LifecycleRule {
            abort_incomplete_multipart_upload: Some(AbortIncompleteUpload {
                days_after_initiation: Some(30),
            }),
            ..LifecycleRule::with_id("ops-base")
        }
    }

    #[test]
    fn translates_in_order_with_enabled_status() {
        let cfg = to_cos_lifecycle(&[expire_logs(), abort_uploads()]).unwrap();
        assert_eq!(cfg.rules.len(), 2);
        assert_eq!(cfg.rules[0].id, "model-cleanup");
        assert_eq!(cfg.rules[1].id, "ops-base");
        assert!(cfg.rules.iter().all(|r| r.status == "Enabled"));
        assert_eq!(
            cfg.rules[0].filter,
            Some(CosLifecycleFilter {
                prefix: "hg/".into()
            })
        );
        assert_eq!(cfg.rules[0].expiration.as_ref().unwrap().days, Some(5));
    }

    #[test]
    fn missing_filter_is_omitted() {
        let cfg = to_cos_lifecycle(&[abort_uploads()]).unwrap();
        assert_eq!(cfg.rules[0].filter, None);
        let json = serde_json::to_value(&cfg).unwrap();
        assert!(json["Rule"][0].get("Filter").is_none());
        assert_eq!(
            json["Rule"][0]["AbortIncompleteMultipartUpload"]["DaysAfterInitiation"],
            30
        );
    }

    #[test]
    fn second_rule_without_id_fails_everything() {
        let mut broken = abort_uploads();
        broken.id = None;
        let err = to_cos_lifecycle(&[expire_logs(), broken]).unwrap_err();
        assert!(matches!(
            err,
            ProviderError::RequestValidation { ref field, .. } if field == "rules[1].id"
        ));
    }

    #[test]
    fn expiration_requires_days() {
        let rule = LifecycleRule {
            expiration: Some(Expiration {
                date: chrono::NaiveDate::from_ymd_opt(2027, 1, 1),
                ..Default::default()
            }),
            ..LifecycleRule::with_id("r")
        };
        assert!(matches!(
            to_cos_lifecycle(&[rule]),
            Err(ProviderError::RequestValidation { ref field, .. }) if field == "rules[0].expiration.days"
        ));
    }

    #[test]
    fn transition_requires_storage_class() {
        let rule = LifecycleRule {
            transition: Some(Transition {
                days: Some(30),
                storage_class: None,
            }),
            ..LifecycleRule::with_id("r")
        };
        assert!(matches!(
            to_cos_lifecycle(&[rule]),
            Err(ProviderError::RequestValidation { ref field, .. }) if field == "rules[0].transition.storage_class"
        ));
    }

    #[test]
    fn noncurrent_transition_requires_days() {
        let rule = LifecycleRule {
            noncurrent_version_transition: Some(NoncurrentTransition {
                days: None,
                storage_class: Some("ARCHIVE".into()),
            }),
            ..LifecycleRule::with_id("r")
        };
        assert!(to_cos_lifecycle(&[rule]).is_err());
    }

    #[test]
    fn reads_back_into_abstract_rules() {
        let native = to_cos_lifecycle(&[expire_logs(), abort_uploads()]).unwrap();
        let back = from_cos_rules(&native.rules).unwrap();
        assert_eq!(back, vec![expire_logs(), abort_uploads()]);
    }
}
