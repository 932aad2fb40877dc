// Random identifiers for the UUID generator page.
use uuid::Uuid;

pub const MAX_BATCH: usize = 100;

pub fn generate_uuid() -> String {
    Uuid::new_v4().to_string()
}

/// Generates `count` v4 UUIDs; `count` must be within `1..=100`.
pub fn generate_uuids(count: usize) -> Result<Vec<String>, String> {
    if !(1..=MAX_BATCH).contains(&count) {
        return Err(format!("count must be between 1 and {MAX_BATCH}"));
    }
    Ok((0..count).map(|_| generate_uuid()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_is_lowercase_v4() {
        let id = generate_uuid();
        let parsed = Uuid::parse_str(&id).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
        assert_eq!(id, id.to_lowercase());
        assert_eq!(id.len(), 36);
    }

    #[test]
    fn batch_bounds() {
        let ids = generate_uuids(5).unwrap();
        assert_eq!(ids.len(), 5);
        assert_ne!(ids[0], ids[1]);
        assert!(generate_uuids(0).is_err());
        assert!(generate_uuids(101).is_err());
    }
}
