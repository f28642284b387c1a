use serde_json::Value;

use crate::platform::types::Partitioned;

/// Whether an issue-like record is a pull request.
///
/// GitHub marks pull requests in the issues listing with a `pull_request`
/// object; a missing, `null` or `false` marker means a plain issue.
pub fn is_pull_request(item: &Value) -> bool {
    !matches!(
        item.get("pull_request"),
        None | Some(Value::Null) | Some(Value::Bool(false))
    )
}

/// Split issue-like records into issues and pull requests, keeping the
/// relative order inside each list. Every record lands in exactly one list.
pub fn split_issues_pull_requests(list: &[Value]) -> Partitioned {
    let (pullrequests, issues): (Vec<Value>, Vec<Value>) = list.iter().cloned().partition(is_pull_request);
    Partitioned {
        issues,
        pullrequests,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_split_example() {
        let list = vec![json!({"id": 1}), json!({"id": 2, "pull_request": {}})];
        let split = split_issues_pull_requests(&list);
        assert_eq!(split.issues, vec![json!({"id": 1})]);
        assert_eq!(split.pullrequests, vec![json!({"id": 2, "pull_request": {}})]);
    }

    #[test]
    fn test_split_preserves_order_and_is_total() {
        let list: Vec<Value> = (0..10)
            .map(|id| {
                if id % 3 == 0 {
                    json!({"id": id, "pull_request": {"url": format!("pr/{id}")}})
                } else {
                    json!({"id": id})
                }
            })
            .collect();

        let split = split_issues_pull_requests(&list);
        assert_eq!(split.issues.len() + split.pullrequests.len(), list.len());

        let ids = |items: &[Value]| -> Vec<i64> {
            items.iter().map(|v| v["id"].as_i64().unwrap()).collect()
        };
        assert_eq!(ids(&split.issues), vec![1, 2, 4, 5, 7, 8]);
        assert_eq!(ids(&split.pullrequests), vec![0, 3, 6, 9]);

        // Stable merge by original position rebuilds the input
        let mut merged: Vec<Value> = split
            .issues
            .iter()
            .chain(split.pullrequests.iter())
            .cloned()
            .collect();
        merged.sort_by_key(|v| v["id"].as_i64().unwrap());
        assert_eq!(merged, list);
    }

    #[test]
    fn test_null_or_false_marker_is_an_issue() {
        let list = vec![
            json!({"id": 1, "pull_request": null}),
            json!({"id": 2, "pull_request": false}),
            json!("not an object"),
        ];
        let split = split_issues_pull_requests(&list);
        assert_eq!(split.issues.len(), 3);
        assert!(split.pullrequests.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let split = split_issues_pull_requests(&[]);
        assert_eq!(split, Partitioned::default());
    }
}
