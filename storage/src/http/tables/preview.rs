use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::tables::WhereFilter;
use crate::http::Escape;

pub const DEFAULT_PREVIEW_LIMIT: u32 = 100;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PreviewTableRequest {
    pub limit: u32,
    pub changed_since: Option<String>,
    pub changed_until: Option<String>,
    /// Subset of columns to return, in this order.
    pub columns: Vec<String>,
    pub filter: Option<WhereFilter>,
}

impl Default for PreviewTableRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PREVIEW_LIMIT,
            changed_since: None,
            changed_until: None,
            columns: vec![],
            filter: None,
        }
    }
}

impl PreviewTableRequest {
    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("limit", self.limit.to_string())];
        if let Some(v) = &self.changed_since {
            pairs.push(("changedSince", v.clone()));
        }
        if let Some(v) = &self.changed_until {
            pairs.push(("changedUntil", v.clone()));
        }
        if !self.columns.is_empty() {
            pairs.push(("columns", self.columns.join(",")));
        }
        if let Some(filter) = &self.filter {
            pairs.push(("whereColumn", filter.where_column.clone()));
            for value in &filter.where_values {
                pairs.push(("whereValues[]", value.clone()));
            }
            pairs.push(("whereOperator", filter.where_operator.as_str().to_string()));
        }
        pairs
    }
}

pub(crate) fn build(base_url: &str, client: &Client, table_id: &str, req: &PreviewTableRequest) -> RequestBuilder {
    let url = format!("{}/tables/{}/data-preview", base_url, table_id.escape());
    client.get(url).query(&req.query_pairs())
}

#[cfg(test)]
mod test {
    use crate::http::tables::preview::PreviewTableRequest;
    use crate::http::tables::{WhereFilter, WhereOperator};

    #[test]
    fn default_pairs() {
        assert_eq!(PreviewTableRequest::default().query_pairs(), vec![("limit", "100".to_string())]);
    }

    #[test]
    fn filter_pairs() {
        let req = PreviewTableRequest {
            limit: 10,
            columns: vec!["col3".to_string(), "col2".to_string()],
            filter: Some(WhereFilter {
                where_column: "col1".to_string(),
                where_values: vec!["ping".to_string(), "foo".to_string()],
                where_operator: WhereOperator::Ne,
            }),
            ..Default::default()
        };
        let pairs = req.query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("limit", "10".to_string()),
                ("columns", "col3,col2".to_string()),
                ("whereColumn", "col1".to_string()),
                ("whereValues[]", "ping".to_string()),
                ("whereValues[]", "foo".to_string()),
                ("whereOperator", "ne".to_string()),
            ]
        );
    }
}
