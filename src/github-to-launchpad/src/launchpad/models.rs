//! Launchpad web service representations.

use serde::Deserialize;

/// A Launchpad distribution that owns bugs.
#[derive(Debug, Clone, Deserialize)]
pub struct Distribution {
    /// Short name, e.g. `openstack-ansible`.
    pub name: String,

    /// Human readable name.
    pub display_name: String,

    /// API URL of the distribution; used as the bug target.
    pub self_link: String,

    /// Website URL of the distribution.
    pub web_link: String,

    /// Type descriptor, ends with `#distribution` for distributions.
    pub resource_type_link: String,
}

impl Distribution {
    /// Returns true if the resource type is a distribution.
    #[must_use]
    pub fn is_distribution(&self) -> bool {
        self.resource_type_link.ends_with("#distribution")
    }
}

/// A bug created on Launchpad.
#[derive(Debug, Clone, Deserialize)]
pub struct Bug {
    /// Launchpad bug number.
    pub id: u64,

    /// Bug title.
    pub title: String,

    /// Website URL of the bug.
    pub web_link: String,
}

/// The authenticated Launchpad user.
#[derive(Debug, Clone, Deserialize)]
pub struct Person {
    /// Launchpad id.
    pub name: String,

    /// Human readable name.
    pub display_name: String,
}

/// Parameters for the `createBug` operation.
#[derive(Debug, Clone, Copy)]
pub struct NewBug<'a> {
    /// Bug title.
    pub title: &'a str,

    /// Full bug description.
    pub description: &'a str,

    /// Distribution the bug is filed against.
    pub target: &'a Distribution,

    /// Whether the bug is private. Migrated bugs are always public.
    pub private: bool,
}

impl<'a> NewBug<'a> {
    /// Creates parameters for a public bug.
    #[must_use]
    pub fn public(title: &'a str, description: &'a str, target: &'a Distribution) -> Self {
        Self {
            title,
            description,
            target,
            private: false,
        }
    }

    /// Form fields for the web service call.
    pub(crate) fn form(&self) -> [(&'static str, &'a str); 5] {
        [
            ("ws.op", "createBug"),
            ("title", self.title),
            ("description", self.description),
            ("target", self.target.self_link.as_str()),
            ("private", if self.private { "true" } else { "false" }),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distribution_json() -> &'static str {
        r##"{
            "name": "openstack-ansible",
            "display_name": "OpenStack-Ansible",
            "self_link": "https://api.launchpad.net/1.0/openstack-ansible",
            "web_link": "https://launchpad.net/openstack-ansible",
            "resource_type_link": "https://api.launchpad.net/1.0/#distribution",
            "title": "OpenStack-Ansible"
        }"##
    }

    #[test]
    fn deserializes_distribution() {
        let distribution: Distribution = serde_json::from_str(distribution_json()).unwrap();

        assert_eq!(distribution.name, "openstack-ansible");
        assert!(distribution.is_distribution());
    }

    #[test]
    fn project_is_not_a_distribution() {
        let mut distribution: Distribution = serde_json::from_str(distribution_json()).unwrap();
        distribution.resource_type_link = "https://api.launchpad.net/1.0/#project".to_string();

        assert!(!distribution.is_distribution());
    }

    #[test]
    fn public_bug_form_fields() {
        let distribution: Distribution = serde_json::from_str(distribution_json()).unwrap();
        let bug = NewBug::public("Title", "Body", &distribution);

        assert_eq!(
            bug.form(),
            [
                ("ws.op", "createBug"),
                ("title", "Title"),
                ("description", "Body"),
                ("target", "https://api.launchpad.net/1.0/openstack-ansible"),
                ("private", "false"),
            ]
        );
    }
}
