//! Provider ordering and eligibility.
//!
//! Priorities are plain integers supplied by settings; they need not be unique or
//! contiguous. Ties fall back to the canonical `ImageService` order so the result is
//! a total order.

use crate::types::{ImageService, ProviderConfig};

pub const UNSPLASH_PLACEHOLDER_KEY: &str = "your_unsplash_access_key_here";
pub const PEXELS_PLACEHOLDER_KEY: &str = "your_pexels_api_key_here";

/// Orders `configs` by ascending priority, then canonical service name.
pub fn order(configs: &[ProviderConfig]) -> Vec<ProviderConfig> {
    let mut ordered = configs.to_vec();
    ordered.sort_by_key(|c| (c.priority, c.name));
    ordered
}

/// Enabled configs only, in attempt order.
pub fn attempt_order(configs: &[ProviderConfig]) -> Vec<ProviderConfig> {
    let enabled: Vec<ProviderConfig> = configs.iter().copied().filter(|c| c.enabled).collect();
    order(&enabled)
}

/// Assigns priorities `1..=N` to `sequence`, keeping each service's `enabled` flag.
///
/// Services present in `current` but missing from `sequence` follow, in their current
/// order, with priorities `N+1..`. Repeated names in `sequence` count once.
pub fn reorder(current: &[ProviderConfig], sequence: &[ImageService]) -> Vec<ProviderConfig> {
    let mut names: Vec<ImageService> = Vec::with_capacity(current.len().max(sequence.len()));
    for name in sequence {
        if !names.contains(name) {
            names.push(*name);
        }
    }
    for cfg in order(current) {
        if !names.contains(&cfg.name) {
            names.push(cfg.name);
        }
    }

    names
        .into_iter()
        .zip(1u32..)
        .map(|(name, priority)| ProviderConfig {
            name,
            enabled: current
                .iter()
                .find(|c| c.name == name)
                .is_none_or(|c| c.enabled),
            priority,
        })
        .collect()
}

pub fn placeholder_credential(service: ImageService) -> &'static str {
    match service {
        ImageService::Unsplash => UNSPLASH_PLACEHOLDER_KEY,
        ImageService::Pexels => PEXELS_PLACEHOLDER_KEY,
    }
}

/// A credential is usable when present, non-blank, and not the known placeholder.
pub fn credential_usable(service: ImageService, credential: Option<&str>) -> bool {
    credential
        .map(str::trim)
        .is_some_and(|k| !k.is_empty() && k != placeholder_credential(service))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(name: ImageService, enabled: bool, priority: u32) -> ProviderConfig {
        ProviderConfig {
            name,
            enabled,
            priority,
        }
    }

    fn names(configs: &[ProviderConfig]) -> Vec<ImageService> {
        configs.iter().map(|c| c.name).collect()
    }

    #[test]
    fn order_is_ascending_by_priority() {
        let configs = [
            cfg(ImageService::Unsplash, true, 7),
            cfg(ImageService::Pexels, true, 3),
        ];
        assert_eq!(
            names(&order(&configs)),
            vec![ImageService::Pexels, ImageService::Unsplash]
        );
    }

    #[test]
    fn ties_break_by_canonical_name_regardless_of_input_order() {
        let a = [
            cfg(ImageService::Pexels, true, 1),
            cfg(ImageService::Unsplash, true, 1),
        ];
        let b = [
            cfg(ImageService::Unsplash, true, 1),
            cfg(ImageService::Pexels, true, 1),
        ];
        assert_eq!(order(&a), order(&b));
        assert_eq!(
            names(&order(&a)),
            vec![ImageService::Unsplash, ImageService::Pexels]
        );
    }

    #[test]
    fn order_is_idempotent() {
        let configs = [
            cfg(ImageService::Pexels, false, 10),
            cfg(ImageService::Unsplash, true, 4),
        ];
        let once = order(&configs);
        assert_eq!(order(&once), once);
        assert_eq!(order(&configs), once);
    }

    #[test]
    fn attempt_order_drops_disabled() {
        let configs = [
            cfg(ImageService::Unsplash, false, 1),
            cfg(ImageService::Pexels, true, 2),
        ];
        assert_eq!(names(&attempt_order(&configs)), vec![ImageService::Pexels]);
    }

    #[test]
    fn reorder_then_order_returns_sequence() {
        let current = [
            cfg(ImageService::Unsplash, true, 1),
            cfg(ImageService::Pexels, false, 2),
        ];
        let sequence = [ImageService::Pexels, ImageService::Unsplash];
        let reordered = reorder(&current, &sequence);

        assert_eq!(names(&order(&reordered)), sequence.to_vec());
        assert_eq!(
            reordered,
            vec![
                cfg(ImageService::Pexels, false, 1),
                cfg(ImageService::Unsplash, true, 2),
            ]
        );
    }

    #[test]
    fn reorder_appends_unmentioned_services() {
        let current = [
            cfg(ImageService::Unsplash, true, 5),
            cfg(ImageService::Pexels, true, 9),
        ];
        let reordered = reorder(&current, &[ImageService::Pexels]);
        assert_eq!(
            reordered,
            vec![
                cfg(ImageService::Pexels, true, 1),
                cfg(ImageService::Unsplash, true, 2),
            ]
        );
    }

    #[test]
    fn placeholder_and_blank_credentials_are_unusable() {
        assert!(!credential_usable(ImageService::Unsplash, None));
        assert!(!credential_usable(ImageService::Unsplash, Some("  ")));
        assert!(!credential_usable(
            ImageService::Unsplash,
            Some(UNSPLASH_PLACEHOLDER_KEY)
        ));
        assert!(!credential_usable(
            ImageService::Pexels,
            Some(PEXELS_PLACEHOLDER_KEY)
        ));
        assert!(credential_usable(ImageService::Pexels, Some("real-key")));
    }
}
