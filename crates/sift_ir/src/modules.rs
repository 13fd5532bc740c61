//! Declarative per-module attribute catalogs.
//!
//! These are registration tables consumed by the expression/symbol layer
//! when it resolves `module.group.function(...)` references in conditions.
//! They are static data, not executable logic; the token stream itself
//! never reads them.

/// Value types a module function can accept or return.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ValueType {
    Int,
    Float,
    Bool,
    Str,
    Regexp,
}

/// One function signature. Overloads appear as separate entries with the
/// same name, mirroring how the catalogs register them.
#[derive(Copy, Clone, Debug)]
pub struct FunctionSig {
    pub name: &'static str,
    pub ret: ValueType,
    pub args: &'static [ValueType],
}

/// A namespace of functions inside a module (`sandbox.network.*`).
#[derive(Copy, Clone, Debug)]
pub struct ModuleGroup {
    pub name: &'static str,
    pub functions: &'static [FunctionSig],
}

/// A whole module catalog.
#[derive(Copy, Clone, Debug)]
pub struct ModuleCatalog {
    pub name: &'static str,
    pub groups: &'static [ModuleGroup],
}

impl ModuleCatalog {
    /// Look up a group by name.
    pub fn group(&self, name: &str) -> Option<&'static ModuleGroup> {
        self.groups.iter().find(|g| g.name == name)
    }
}

const fn sig(name: &'static str, ret: ValueType, args: &'static [ValueType]) -> FunctionSig {
    FunctionSig { name, ret, args }
}

use ValueType::{Float, Int, Regexp, Str};

/// Sandbox-telemetry module: matches against dynamic-analysis reports.
pub static SANDBOX: ModuleCatalog = ModuleCatalog {
    name: "sandbox",
    groups: &[
        ModuleGroup {
            name: "network",
            functions: &[
                sig("dns_lookup", Int, &[Regexp]),
                sig("http_get", Int, &[Regexp]),
                sig("http_post", Int, &[Regexp]),
                sig("http_request", Int, &[Regexp]),
                sig("tcp_request", Int, &[Regexp]),
                sig("tcp_request", Int, &[Regexp, Int]),
                sig("http_request_body", Int, &[Regexp]),
                sig("http_request_body", Int, &[Regexp, Regexp]),
                sig("http_response_body", Int, &[Regexp]),
                sig("http_response_body", Int, &[Regexp, Regexp]),
                sig("connection_ip", Int, &[Regexp]),
                sig("connection_country", Int, &[Regexp]),
                sig("irc_command", Int, &[Regexp, Regexp]),
            ],
        },
        ModuleGroup {
            name: "registry",
            functions: &[
                sig("key_access", Int, &[Regexp]),
                sig("key_read", Int, &[Regexp]),
                sig("key_write", Int, &[Regexp]),
                sig("key_delete", Int, &[Regexp]),
                sig("key_value_access", Int, &[Regexp, Regexp]),
            ],
        },
        ModuleGroup {
            name: "filesystem",
            functions: &[
                sig("file_access", Int, &[Regexp]),
                sig("file_read", Int, &[Regexp]),
                sig("file_write", Int, &[Regexp]),
                sig("file_delete", Int, &[Regexp]),
                sig("pipe", Int, &[Regexp]),
                sig("mailslot", Int, &[Regexp]),
            ],
        },
        ModuleGroup {
            name: "sync",
            functions: &[
                sig("mutex", Int, &[Regexp]),
                sig("event", Int, &[Regexp]),
                sig("semaphore", Int, &[Regexp]),
                sig("atom", Int, &[Regexp]),
                sig("section", Int, &[Regexp]),
                sig("job", Int, &[Regexp]),
                sig("timer", Int, &[Regexp]),
            ],
        },
        ModuleGroup {
            name: "process",
            functions: &[
                sig("executed_command", Int, &[Regexp]),
                sig("created_service", Int, &[Regexp]),
                sig("started_service", Int, &[Regexp]),
                sig("resolved_api", Int, &[Regexp]),
                sig("load_path", Int, &[Regexp]),
                sig("load_sha256", Int, &[Str]),
                sig("api_call", Int, &[Regexp]),
                sig("modified_clipboard", Int, &[Regexp]),
            ],
        },
        ModuleGroup {
            name: "signature",
            functions: &[
                sig("name", Int, &[Regexp]),
                sig("hits", Int, &[Regexp]),
                sig("hits", Int, &[Regexp, Regexp]),
                sig("hits", Int, &[Str]),
                sig("hits", Int, &[Str, Regexp]),
            ],
        },
        ModuleGroup {
            name: "summary",
            functions: &[sig("ml_score", Float, &[Str])],
        },
    ],
};

/// Every registered module catalog.
pub static MODULES: &[&ModuleCatalog] = &[&SANDBOX];

/// Look up a module catalog by name.
pub fn lookup(name: &str) -> Option<&'static ModuleCatalog> {
    MODULES.iter().find(|m| m.name == name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_registered_modules() {
        assert!(lookup("sandbox").is_some());
        assert!(lookup("nonexistent").is_none());
    }

    #[test]
    fn sandbox_groups_are_reachable() {
        let sandbox = SANDBOX;
        let network = sandbox.group("network");
        assert!(network.is_some_and(|g| g.functions.iter().any(|f| f.name == "dns_lookup")));
        assert!(sandbox.group("summary").is_some());
        assert!(sandbox.group("gpu").is_none());
    }

    #[test]
    fn overloads_register_as_separate_entries() {
        let sandbox = SANDBOX;
        let hits: Vec<_> = sandbox
            .group("signature")
            .into_iter()
            .flat_map(|g| g.functions.iter())
            .filter(|f| f.name == "hits")
            .collect();
        assert_eq!(hits.len(), 4);
        assert!(hits.iter().all(|f| f.ret == ValueType::Int));
    }
}
