use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ListFilesRequest {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    /// Only files carrying all of these tags.
    pub tags: Vec<String>,
    /// Full text query.
    pub q: Option<String>,
    pub run_id: Option<String>,
    pub since_id: Option<String>,
    pub max_id: Option<String>,
    pub show_expired: bool,
}

impl ListFilesRequest {
    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![];
        if let Some(v) = self.limit {
            pairs.push(("limit", v.to_string()));
        }
        if let Some(v) = self.offset {
            pairs.push(("offset", v.to_string()));
        }
        for tag in &self.tags {
            pairs.push(("tags[]", tag.clone()));
        }
        let optional = [
            ("q", &self.q),
            ("runId", &self.run_id),
            ("sinceId", &self.since_id),
            ("maxId", &self.max_id),
        ];
        for (key, value) in optional {
            if let Some(v) = value {
                pairs.push((key, v.clone()));
            }
        }
        if self.show_expired {
            pairs.push(("showExpired", "1".to_string()));
        }
        pairs
    }
}

pub(crate) fn build(base_url: &str, client: &Client, req: &ListFilesRequest) -> RequestBuilder {
    let url = format!("{base_url}/files");
    client.get(url).query(&req.query_pairs())
}
