use crate::error::{ProviderError, Result};
use crate::providers::aws_s3::{
    PROVIDER_NAME, PutLifecycleInput, S3AbortIncompleteMultipartUpload, S3Expiration,
    S3LifecycleConfiguration, S3LifecycleFilter, S3LifecycleRule, S3NoncurrentVersionExpiration,
    S3NoncurrentVersionTransition, S3Transition,
};
use crate::types::{
    AbortIncompleteUpload, Expiration, LifecycleFilter, LifecycleRule, NoncurrentExpiration,
    NoncurrentTransition, Transition,
};

use super::{STATUS_ENABLED, parse_date, render_date, required, required_class, rule_id};

/// Abstract rules to an S3 `PutBucketLifecycleConfiguration` input.
///
/// S3 needs a prefix filter on every rule (an empty prefix covers the whole
/// bucket), and an expiration carrying exactly one of days, date or the
/// delete-marker flag.
pub fn to_s3_lifecycle(bucket: &str, rules: &[LifecycleRule]) -> Result<PutLifecycleInput> {
    if bucket.trim().is_empty() {
        return Err(ProviderError::validation(
            PROVIDER_NAME,
            "bucket",
            "bucket name is required",
        ));
    }
    let rules = rules
        .iter()
        .enumerate()
        .map(|(index, rule)| to_s3_rule(index, rule))
        .collect::<Result<Vec<_>>>()?;
    Ok(PutLifecycleInput {
        bucket: bucket.to_string(),
        lifecycle_configuration: S3LifecycleConfiguration { rules },
    })
}

fn to_s3_rule(index: usize, rule: &LifecycleRule) -> Result<S3LifecycleRule> {
    let p = PROVIDER_NAME;
    let id = rule_id(p, index, rule)?;

    let prefix = rule
        .filter
        .as_ref()
        .and_then(|f| f.prefix.clone())
        .ok_or_else(|| {
            ProviderError::validation(p, format!("rules[{index}].filter"), "filter is required")
        })?;

    let expiration = match &rule.expiration {
        Some(e) => Some(to_s3_expiration(index, e)?),
        None => None,
    };

    let noncurrent_version_expiration = match &rule.noncurrent_version_expiration {
        Some(e) => Some(S3NoncurrentVersionExpiration {
            noncurrent_days: required(p, index, "noncurrent_version_expiration.days", e.days)?,
        }),
        None => None,
    };

    let mut transitions = Vec::new();
    if let Some(t) = &rule.transition {
        transitions.push(S3Transition {
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
        noncurrent_version_transitions.push(S3NoncurrentVersionTransition {
            noncurrent_days: required(p, index, "noncurrent_version_transition.days", t.days)?,
            storage_class: required_class(
                p,
                index,
                "noncurrent_version_transition.storage_class",
                t.storage_class.as_ref(),
            )?,
        });
    }

    let abort_incomplete_multipart_upload = match &rule.abort_incomplete_multipart_upload {
        Some(a) => Some(S3AbortIncompleteMultipartUpload {
            days_after_initiation: required(
                p,
                index,
                "abort_incomplete_multipart_upload.days_after_initiation",
                a.days_after_initiation,
            )?,
        }),
        None => None,
    };

    Ok(S3LifecycleRule {
        id,
        status: STATUS_ENABLED.to_string(),
        filter: S3LifecycleFilter { prefix },
        expiration,
        transitions,
        noncurrent_version_expiration,
        noncurrent_version_transitions,
        abort_incomplete_multipart_upload,
    })
}

fn to_s3_expiration(index: usize, e: &Expiration) -> Result<S3Expiration> {
    let set = [
        e.days.is_some(),
        e.date.is_some(),
        e.expired_object_delete_marker.is_some(),
    ]
    .into_iter()
    .filter(|set| *set)
    .count();
    if set != 1 {
        return Err(ProviderError::validation(
            PROVIDER_NAME,
            format!("rules[{index}].expiration"),
            "exactly one of days, date or expired_object_delete_marker is required",
        ));
    }
    Ok(S3Expiration {
        days: e.days,
        date: e.date.map(render_date),
        expired_object_delete_marker: e.expired_object_delete_marker,
    })
}

/// S3 rules back to abstract rules.
pub fn from_s3_rules(rules: &[S3LifecycleRule]) -> Result<Vec<LifecycleRule>> {
    rules.iter().map(from_s3_rule).collect()
}

fn from_s3_rule(rule: &S3LifecycleRule) -> Result<LifecycleRule> {
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
        filter: Some(LifecycleFilter {
            prefix: Some(rule.filter.prefix.clone()),
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
                storage_class: Some(t.storage_class.clone()),
            }
        }),
        abort_incomplete_multipart_upload: rule.abort_incomplete_multipart_upload.as_ref().map(
            |a| AbortIncompleteUpload {
                days_after_initiation: Some(a.days_after_initiation),
            },
        ),
    })
}
