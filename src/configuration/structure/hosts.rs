use std::convert::Infallible;

use crate::configuration::traits::ResolvableConfiguration;


/// The raw `Hosts` value: host names or IPs separated by commas.
pub(crate) struct UnresolvedHosts(pub(crate) String);

impl ResolvableConfiguration for UnresolvedHosts {
    type Resolved = Vec<String>;
    type Error = Infallible;

    fn resolve(self) -> Result<Self::Resolved, Self::Error> {
        let without_whitespace: String = self
            .0
            .chars()
            .filter(|character| !character.is_whitespace())
            .collect();

        // An empty list (`Hosts=`) or stray separators must never produce empty host names.
        Ok(without_whitespace
            .split(',')
            .filter(|host| !host.is_empty())
            .map(str::to_string)
            .collect())
    }
}

/// Joins hosts the way they are written back to the configuration file.
pub(crate) fn join_hosts(hosts: &[String]) -> String {
    hosts.join(", ")
}
