//! Transformation functions for OpenProject work-package API responses
//!
//! The wire types mirror the HAL-JSON envelopes the server produces. Related
//! entities (status, type, priority, assignee) arrive as denormalized titles
//! under `_links`; the client never follows those links, so they are
//! flattened into plain optional strings on [`WorkPackageOutput`]. Every
//! nested object defaults to empty when absent so a sparse work package
//! decodes cleanly instead of failing.

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::pagination::Page;

/// A single work package as returned by the API.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WorkPackageResponse {
    pub id: u64,
    #[serde(rename = "lockVersion")]
    pub lock_version: u64,
    pub subject: String,
    #[serde(default)]
    pub description: Description,
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: String,
    #[serde(rename = "_links", default)]
    pub links: Links,
}

/// Long-form description with its format tag.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Description {
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub raw: String,
}

/// Denormalized titles of related entities.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Links {
    #[serde(default)]
    pub status: LinkTitle,
    #[serde(rename = "type", default)]
    pub kind: LinkTitle,
    #[serde(default)]
    pub priority: LinkTitle,
    #[serde(default)]
    pub assignee: LinkTitle,
}

/// Display title of a linked entity. Absent or null when the link is unset.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct LinkTitle {
    #[serde(default)]
    pub title: Option<String>,
}

/// Collection envelope for the project listing endpoint.
#[derive(Debug, Deserialize, Clone)]
pub struct WorkPackageListResponse {
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub count: usize,
    #[serde(rename = "_embedded", default)]
    pub embedded: EmbeddedElements,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EmbeddedElements {
    #[serde(default)]
    pub elements: Vec<WorkPackageResponse>,
}

/// The authenticated user, as returned by the `me` endpoint.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct User {
    pub id: u64,
    pub name: String,
}

/// Identifier echoed back by the server after a successful create.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CreatedWorkPackage {
    pub id: u64,
    pub subject: String,
}

/// Flattened work package for rendering and JSON output.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WorkPackageOutput {
    pub id: u64,
    pub subject: String,
    pub description: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub priority: Option<String>,
    pub assignee: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub lock_version: u64,
}

/// One page of flattened work packages plus its pagination metadata.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ListOutput {
    pub items: Vec<WorkPackageOutput>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub has_next: bool,
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn link_title(link: LinkTitle) -> Option<String> {
    link.title.filter(|title| !title.is_empty())
}

/// Flatten a HAL work package into the display record.
///
/// Unset link titles and blank fields become `None` so callers can
/// distinguish "not set" from an empty string.
pub fn transform_work_package(response: WorkPackageResponse) -> WorkPackageOutput {
    WorkPackageOutput {
        id: response.id,
        subject: response.subject,
        description: non_empty(response.description.raw),
        status: link_title(response.links.status),
        kind: link_title(response.links.kind),
        priority: link_title(response.links.priority),
        assignee: link_title(response.links.assignee),
        created_at: non_empty(response.created_at),
        updated_at: non_empty(response.updated_at),
        lock_version: response.lock_version,
    }
}

/// Flatten a page of HAL work packages, carrying the metadata through.
pub fn transform_page(page: Page<WorkPackageResponse>) -> ListOutput {
    ListOutput {
        items: page
            .items
            .into_iter()
            .map(transform_work_package)
            .collect(),
        total: page.total,
        page: page.page,
        page_size: page.page_size,
        total_pages: page.total_pages,
        has_next: page.has_next,
    }
}

/// Build the JSON body for a work-package create.
///
/// The `_links.type` reference is only present when a non-empty type name is
/// supplied; the server falls back to the project's default type otherwise.
pub fn build_create_payload(
    subject: &str,
    description: &str,
    type_name: Option<&str>,
) -> serde_json::Value {
    let mut payload = serde_json::json!({
        "subject": subject,
        "description": {
            "format": "markdown",
            "raw": description,
        },
    });

    if let Some(type_name) = type_name.filter(|name| !name.is_empty()) {
        payload["_links"] = serde_json::json!({
            "type": { "href": format!("/api/v3/types?name={type_name}") }
        });
    }

    payload
}

/// Build the JSON body for an assignee update.
///
/// `lock_version` must be the value read from the server immediately before
/// the write; a mismatch makes the server reject the update.
pub fn build_assign_payload(lock_version: u64, assignee_id: u64) -> serde_json::Value {
    serde_json::json!({
        "lockVersion": lock_version,
        "_links": {
            "assignee": { "href": format!("/api/v3/users/{assignee_id}") }
        },
    })
}

/// Render an ISO-8601 timestamp as `dd/mm/yyyy HH:MM`, falling back to the
/// raw string when it does not parse.
pub fn format_timestamp(iso: &str) -> String {
    match DateTime::parse_from_rfc3339(iso) {
        Ok(timestamp) => timestamp.format("%d/%m/%Y %H:%M").to_string(),
        Err(_) => iso.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::paginate;

    // Helper to build a response the way the server would send it
    fn work_package_fixture(id: u64, subject: &str, status: &str) -> WorkPackageResponse {
        WorkPackageResponse {
            id,
            lock_version: 3,
            subject: subject.to_string(),
            description: Description {
                format: "markdown".to_string(),
                raw: "Steps to reproduce".to_string(),
            },
            created_at: "2024-05-01T10:00:00Z".to_string(),
            updated_at: "2024-05-02T18:30:00Z".to_string(),
            links: Links {
                status: LinkTitle {
                    title: Some(status.to_string()),
                },
                kind: LinkTitle {
                    title: Some("Bug".to_string()),
                },
                priority: LinkTitle {
                    title: Some("High".to_string()),
                },
                assignee: LinkTitle {
                    title: Some("Ada Lovelace".to_string()),
                },
            },
        }
    }

    #[test]
    fn test_decode_hal_work_package() {
        // Arrange: a trimmed-down but shape-accurate HAL body
        let body = r#"{
            "id": 42,
            "lockVersion": 7,
            "subject": "Login page crashes",
            "description": { "format": "markdown", "raw": "Stack trace attached" },
            "createdAt": "2024-05-01T10:00:00Z",
            "updatedAt": "2024-05-02T18:30:00Z",
            "_links": {
                "self": { "href": "/api/v3/work_packages/42" },
                "status": { "href": "/api/v3/statuses/1", "title": "New" },
                "type": { "href": "/api/v3/types/2", "title": "Bug" },
                "priority": { "href": "/api/v3/priorities/8", "title": "High" },
                "assignee": { "href": "/api/v3/users/5", "title": "Ada Lovelace" }
            }
        }"#;

        // Act
        let wp: WorkPackageResponse = serde_json::from_str(body).unwrap();

        // Assert
        assert_eq!(wp.id, 42);
        assert_eq!(wp.lock_version, 7);
        assert_eq!(wp.subject, "Login page crashes");
        assert_eq!(wp.description.raw, "Stack trace attached");
        assert_eq!(wp.links.status.title.as_deref(), Some("New"));
        assert_eq!(wp.links.kind.title.as_deref(), Some("Bug"));
        assert_eq!(wp.links.assignee.title.as_deref(), Some("Ada Lovelace"));
    }

    #[test]
    fn test_decode_tolerates_absent_optional_objects() {
        // Arrange: no description, no timestamps, and a _links without
        // priority or assignee entries
        let body = r#"{
            "id": 9,
            "lockVersion": 0,
            "subject": "Sparse work package",
            "_links": {
                "status": { "title": "New" },
                "assignee": { "href": null, "title": null }
            }
        }"#;

        let wp: WorkPackageResponse = serde_json::from_str(body).unwrap();

        assert_eq!(wp.subject, "Sparse work package");
        assert_eq!(wp.description.raw, "");
        assert_eq!(wp.created_at, "");
        assert_eq!(wp.links.priority.title, None);
        assert_eq!(wp.links.assignee.title, None);
    }

    #[test]
    fn test_decode_list_envelope() {
        let body = r#"{
            "total": 2,
            "count": 2,
            "_embedded": {
                "elements": [
                    { "id": 1, "lockVersion": 0, "subject": "First" },
                    { "id": 2, "lockVersion": 4, "subject": "Second" }
                ]
            },
            "_links": {
                "nextByOffset": { "href": "/api/v3/work_packages?offset=2" }
            }
        }"#;

        let list: WorkPackageListResponse = serde_json::from_str(body).unwrap();

        assert_eq!(list.total, 2);
        assert_eq!(list.embedded.elements.len(), 2);
        assert_eq!(list.embedded.elements[1].subject, "Second");
    }

    #[test]
    fn test_transform_work_package_full() {
        let wp = work_package_fixture(42, "Login page crashes", "In progress");

        let output = transform_work_package(wp);

        assert_eq!(output.id, 42);
        assert_eq!(output.subject, "Login page crashes");
        assert_eq!(output.description, Some("Steps to reproduce".to_string()));
        assert_eq!(output.status, Some("In progress".to_string()));
        assert_eq!(output.kind, Some("Bug".to_string()));
        assert_eq!(output.priority, Some("High".to_string()));
        assert_eq!(output.assignee, Some("Ada Lovelace".to_string()));
        assert_eq!(output.lock_version, 3);
    }

    #[test]
    fn test_transform_maps_empty_titles_to_none() {
        // Arrange: unset links come through as empty strings on the wire
        let mut wp = work_package_fixture(7, "Unassigned task", "New");
        wp.links.assignee.title = Some(String::new());
        wp.links.priority.title = None;
        wp.description.raw.clear();

        let output = transform_work_package(wp);

        assert_eq!(output.assignee, None);
        assert_eq!(output.priority, None);
        assert_eq!(output.description, None);
        assert_eq!(output.status, Some("New".to_string()));
    }

    #[test]
    fn test_transform_page_carries_metadata() {
        let all = vec![
            work_package_fixture(1, "First", "New"),
            work_package_fixture(2, "Second", "New"),
            work_package_fixture(3, "Third", "Done"),
        ];

        let output = transform_page(paginate(all, 2, 2));

        assert_eq!(output.items.len(), 1);
        assert_eq!(output.items[0].id, 3);
        assert_eq!(output.total, 3);
        assert_eq!(output.page, 2);
        assert_eq!(output.total_pages, 2);
        assert!(!output.has_next);
    }

    #[test]
    fn test_create_payload_without_type_omits_the_links_object() {
        let payload = build_create_payload("Bug in login", "Stack trace: ...", None);

        assert_eq!(payload["subject"], "Bug in login");
        assert_eq!(payload["description"]["format"], "markdown");
        assert_eq!(payload["description"]["raw"], "Stack trace: ...");
        assert!(payload.get("_links").is_none());
    }

    #[test]
    fn test_create_payload_with_empty_type_omits_the_links_object() {
        let payload = build_create_payload("Bug in login", "Stack trace: ...", Some(""));

        assert!(payload.get("_links").is_none());
    }

    #[test]
    fn test_create_payload_with_type_references_the_type_by_name() {
        let payload = build_create_payload("Bug in login", "Stack trace: ...", Some("Bug"));

        assert_eq!(payload["_links"]["type"]["href"], "/api/v3/types?name=Bug");
    }

    #[test]
    fn test_assign_payload_carries_token_and_user_href() {
        let payload = build_assign_payload(12, 5);

        assert_eq!(payload["lockVersion"], 12);
        assert_eq!(payload["_links"]["assignee"]["href"], "/api/v3/users/5");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp("2024-05-01T10:04:00Z"), "01/05/2024 10:04");
        assert_eq!(
            format_timestamp("2024-05-01T10:04:00+02:00"),
            "01/05/2024 10:04"
        );
        // Unparseable input passes through untouched
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }
}
