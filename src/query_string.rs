use std::collections::HashMap;

#[derive(PartialEq, Debug)]
pub struct QueryString {
    items: HashMap<String, String>,
}

impl QueryString {
    pub fn from(buf: &str) -> Self {
        let vs: Vec<(String, String)> = serde_urlencoded::from_str(buf).unwrap_or_else(|_| vec![]);
        let items: HashMap<String, String> = vs.into_iter().collect();

        QueryString { items }
    }

    // An empty value counts as absent
    pub fn tag(&self) -> Option<&str> {
        self.items
            .get("tag")
            .map(|s| s.as_str())
            .filter(|s| !s.is_empty())
    }
}
