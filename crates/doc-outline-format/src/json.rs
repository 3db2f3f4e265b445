use chrono::{DateTime, Utc};
use doc_outline::DocPage;
use serde::Serialize;

#[derive(Serialize)]
struct PageEnvelope<'a> {
    #[serde(flatten)]
    page: &'a DocPage,
    #[serde(skip_serializing_if = "Option::is_none")]
    generated_at: Option<DateTime<Utc>>,
}

pub(crate) fn to_pretty<T: Serialize + ?Sized>(value: &T) -> String {
    let mut rendered =
        serde_json::to_string_pretty(value).expect("document data always serializes to JSON");
    rendered.push('\n');
    rendered
}

pub(crate) fn page(page: &DocPage, timestamp: bool) -> String {
    to_pretty(&PageEnvelope {
        page,
        generated_at: timestamp.then(Utc::now),
    })
}
