// jmdeps-common/src/platform.rs
// Modules shipped with the Java platform. Requiring one never adds a dependency.

use std::collections::HashSet;

use lazy_static::lazy_static;

const JDK_MODULES: &[&str] = &[
    "java.base",
    "java.compiler",
    "java.datatransfer",
    "java.desktop",
    "java.instrument",
    "java.logging",
    "java.management",
    "java.management.rmi",
    "java.naming",
    "java.net.http",
    "java.prefs",
    "java.rmi",
    "java.scripting",
    "java.se",
    "java.security.jgss",
    "java.security.sasl",
    "java.smartcardio",
    "java.sql",
    "java.sql.rowset",
    "java.transaction.xa",
    "java.xml",
    "java.xml.crypto",
    "jdk.accessibility",
    "jdk.attach",
    "jdk.charsets",
    "jdk.compiler",
    "jdk.crypto.cryptoki",
    "jdk.crypto.ec",
    "jdk.dynalink",
    "jdk.editpad",
    "jdk.graal.compiler",
    "jdk.graal.compiler.management",
    "jdk.hotspot.agent",
    "jdk.httpserver",
    "jdk.incubator.vector",
    "jdk.internal.ed",
    "jdk.internal.jvmstat",
    "jdk.internal.le",
    "jdk.internal.md",
    "jdk.internal.opt",
    "jdk.internal.vm.ci",
    "jdk.jartool",
    "jdk.javadoc",
    "jdk.jcmd",
    "jdk.jconsole",
    "jdk.jdeps",
    "jdk.jdi",
    "jdk.jdwp.agent",
    "jdk.jfr",
    "jdk.jlink",
    "jdk.jpackage",
    "jdk.jshell",
    "jdk.jsobject",
    "jdk.jstatd",
    "jdk.localedata",
    "jdk.management",
    "jdk.management.agent",
    "jdk.management.jfr",
    "jdk.naming.dns",
    "jdk.naming.rmi",
    "jdk.net",
    "jdk.nio.mapmode",
    "jdk.random",
    "jdk.sctp",
    "jdk.security.auth",
    "jdk.security.jgss",
    "jdk.unsupported",
    "jdk.unsupported.desktop",
    "jdk.xml.dom",
    "jdk.zipfs",
];

lazy_static! {
    static ref PLATFORM_MODULES: HashSet<&'static str> = JDK_MODULES.iter().copied().collect();
}

pub fn is_platform_module(module_name: &str) -> bool {
    PLATFORM_MODULES.contains(module_name)
}

pub fn platform_modules() -> impl Iterator<Item = &'static str> {
    JDK_MODULES.iter().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knows_jdk_modules() {
        assert!(is_platform_module("java.base"));
        assert!(is_platform_module("java.desktop"));
        assert!(is_platform_module("jdk.httpserver"));
        assert!(!is_platform_module("javafx.base"));
        assert!(!is_platform_module("java"));
    }

    #[test]
    fn list_has_no_duplicates() {
        assert_eq!(PLATFORM_MODULES.len(), JDK_MODULES.len());
    }
}
