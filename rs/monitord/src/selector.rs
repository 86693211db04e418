use std::fmt;

use kube::api::ApiResource;

use crate::constant::{MONITOR_GROUP, MONITOR_KIND, MONITOR_RESOURCE, MONITOR_VERSION};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSelector {
    group: String,
    version: String,
    resource: String,
    kind: String,
}

impl Default for ResourceSelector {
    fn default() -> Self {
        Self::new(MONITOR_GROUP, MONITOR_VERSION, MONITOR_RESOURCE, MONITOR_KIND)
    }
}

impl fmt::Display for ResourceSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.group, self.version, self.resource)
    }
}

impl ResourceSelector {
    pub fn new(group: &str, version: &str, resource: &str, kind: &str) -> Self {
        Self {
            group: group.to_owned(),
            version: version.to_owned(),
            resource: resource.to_owned(),
            kind: kind.to_owned(),
        }
    }

    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }

    // Built by hand rather than `ApiResource::from_gvk` so the plural is
    // the configured one instead of a guess from the kind.
    pub fn api_resource(&self) -> ApiResource {
        ApiResource {
            group: self.group.clone(),
            version: self.version.clone(),
            api_version: self.api_version(),
            kind: self.kind.clone(),
            plural: self.resource.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_selects_monitors() {
        let selector = ResourceSelector::default();
        assert_eq!(selector.to_string(), "k8mon.tpretz.com/v1/monitors");

        let api_resource = selector.api_resource();
        assert_eq!(api_resource.group, "k8mon.tpretz.com");
        assert_eq!(api_resource.version, "v1");
        assert_eq!(api_resource.api_version, "k8mon.tpretz.com/v1");
        assert_eq!(api_resource.plural, "monitors");
        assert_eq!(api_resource.kind, "Monitor");
    }

    #[rstest]
    #[case("", "v1", "v1")]
    #[case("apps", "v1", "apps/v1")]
    #[case("example.com", "v1beta1", "example.com/v1beta1")]
    fn test_api_version(#[case] group: &str, #[case] version: &str, #[case] expected: &str) {
        let selector = ResourceSelector::new(group, version, "things", "Thing");
        assert_eq!(selector.api_version(), expected);
    }
}
