use serde::Deserialize;

/**
 * Pagination params for list endpoints.
 */
#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub skip: i64,

    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults() {
        let params: ListParams = serde_json::from_str("{}").unwrap();

        assert_eq!(params.skip, 0);
        assert_eq!(params.limit, 100);
    }

    #[test]
    fn pagination_accepts_overrides() {
        let params: ListParams =
            serde_json::from_str(r#"{"skip": 20, "limit": 10}"#).unwrap();

        assert_eq!(params.skip, 20);
        assert_eq!(params.limit, 10);
    }
}
