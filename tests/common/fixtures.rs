//! Static Notion response bodies used across harnesses.
//!
//! The JSON mirrors what the query proxy relays from Notion, including the
//! fields the pipeline ignores (`object`, property `id`s, timestamps), so the
//! decoder is exercised against realistic input.

/// First page of a Korean-schema sales database.
pub const PAGE_KOREAN_1: &str = r#"{
  "object": "list",
  "results": [
    {
      "object": "page",
      "id": "9a1f-0001",
      "created_time": "2024-03-02T01:00:00.000Z",
      "last_edited_time": "2024-03-05T01:00:00.000Z",
      "properties": {
        "Name": {"id": "title", "type": "title", "title": [{"type": "text", "plain_text": "서울내과"}]},
        "상태": {"id": "s%3A", "type": "select", "select": {"id": "1", "name": "진행중", "color": "blue"}},
        "방문차수": {"id": "v%3A", "type": "select", "select": {"id": "2", "name": "3차", "color": "gray"}},
        "최종방문일자": {"id": "d%3A", "type": "date", "date": {"start": "2024-03-01", "end": null, "time_zone": null}},
        "반응": {"id": "r%3A", "type": "select", "select": null},
        "세일즈단계": {"id": "g%3A", "type": "select", "select": {"id": "3", "name": "a", "color": "red"}},
        "Amount": {"id": "a%3A", "type": "number", "number": 0},
        "Date": {"id": "t%3A", "type": "date", "date": {"start": "2024-03-02"}},
        "태그": {"id": "m%3A", "type": "multi_select", "multi_select": [{"name": "VIP"}]}
      }
    },
    {
      "object": "page",
      "id": "9a1f-0002",
      "created_time": "2024-03-10T01:00:00.000Z",
      "last_edited_time": "2024-03-10T01:00:00.000Z",
      "properties": {
        "Name": {"id": "title", "type": "title", "title": []},
        "상태": {"id": "s%3A", "type": "select", "select": {"id": "4", "name": "Unknown"}},
        "방문차수": {"id": "v%3A", "type": "select", "select": {"id": "5", "name": "7회"}},
        "최종방문일자": {"id": "d%3A", "type": "date", "date": null},
        "반응": {"id": "r%3A", "type": "select", "select": {"id": "6", "name": "긍정"}},
        "세일즈단계": {"id": "g%3A", "type": "select", "select": {"id": "7", "name": "Z"}},
        "Amount": {"id": "a%3A", "type": "number", "number": 1500000},
        "Date": {"id": "t%3A", "type": "date", "date": {"start": "2024-04-11T09:30:00.000+09:00"}},
        "태그": {"id": "m%3A", "type": "multi_select", "multi_select": []}
      }
    }
  ],
  "next_cursor": "cursor-page-2",
  "has_more": true,
  "type": "page_or_database",
  "page_or_database": {}
}"#;

/// Second and final page of the same database.
pub const PAGE_KOREAN_2: &str = r#"{
  "object": "list",
  "results": [
    {
      "object": "page",
      "id": "9a1f-0003",
      "properties": {
        "Name": {"id": "title", "type": "title", "title": [{"plain_text": "  부산정형외과 "}]},
        "상태": {"id": "s%3A", "type": "select", "select": {"name": "완료"}},
        "방문차수": {"id": "v%3A", "type": "select", "select": {"name": "12차"}},
        "반응": {"id": "r%3A", "type": "select", "select": {"name": "보통"}},
        "세일즈단계": {"id": "g%3A", "type": "select", "select": {"name": "S"}},
        "Amount": {"id": "a%3A", "type": "number", "number": null},
        "Price": {"id": "p%3A", "type": "number", "number": 320000},
        "Date": {"id": "t%3A", "type": "date", "date": {"start": "2024-04-02"}}
      }
    }
  ],
  "next_cursor": null,
  "has_more": false
}"#;

/// An empty database.
pub const PAGE_EMPTY: &str = r#"{"object":"list","results":[],"next_cursor":null,"has_more":false}"#;

/// An English-schema record using `status` kinds and contact fields.
pub const PAGE_ENGLISH: &str = r#"{
  "object": "list",
  "results": [
    {
      "object": "page",
      "id": "en-1",
      "properties": {
        "Title": {"id": "title", "type": "title", "title": [{"plain_text": "Acme Clinic"}]},
        "Status": {"id": "s", "type": "status", "status": {"name": "In progress"}},
        "Visit Count": {"id": "v", "type": "rich_text", "rich_text": [{"plain_text": "visited 4 times"}]},
        "Sales Stage": {"id": "g", "type": "select", "select": {"name": "b"}},
        "Price": {"id": "p", "type": "number", "number": 99.5},
        "Created": {"id": "c", "type": "date", "date": {"start": "2023-12-24"}},
        "Notes": {"id": "n", "type": "rich_text", "rich_text": [{"plain_text": "Call back after holidays"}]},
        "Phone": {"id": "ph", "type": "phone_number", "phone_number": "+1 555 0100"},
        "Email": {"id": "e", "type": "email", "email": "ops@acme.test"}
      }
    }
  ],
  "next_cursor": null,
  "has_more": false
}"#;

/// Decode one of the bodies above into a `Page`.
pub fn decode_page(body: &str) -> salesboard_core::Page {
    serde_json::from_str(body).expect("fixture page must decode")
}
