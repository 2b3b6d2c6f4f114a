use std::collections::BTreeMap;

use crate::class::ComponentClass;

const RESISTOR_BASES: [(&str, &str); 4] = [
    ("0402", "44fe0594-19d5-403e-9ae8-7c4c59c3668f"),
    ("0603", "cbeda48c-7fb0-4cfb-a4de-d9672e8cc190"),
    ("0805", "0aaa5955-e860-49fa-9b04-c3fe2d4bc010"),
    ("1206", "69d9d487-801a-40ab-a821-5a7a6ee8c623"),
];

const CAPACITOR_BASES: [(&str, &str); 5] = [
    ("0402", "29043bfd-c944-47cb-ae49-8dc6e1cf7257"),
    ("0603", "436da8ee-a0a4-4ab4-ae41-10323bb580e5"),
    ("0805", "2f50150e-b407-4eda-899c-4a8339af9433"),
    ("1206", "7537f389-14a5-43a6-9b2a-100266cd51d8"),
    ("1210", "ce744d78-f7d9-4997-8666-fd10d77eccb6"),
];

/// Package code to base part lookup, per component class.
///
/// Built once at startup and only read afterwards. Identifiers are taken as
/// given; nothing checks that they name a real base part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseTable {
    classes: BTreeMap<ComponentClass, BTreeMap<String, String>>,
}

impl BaseTable {
    /// Base parts shipped with the main pool.
    pub fn builtin() -> Self {
        let mut table = Self::default();
        for (package, base) in RESISTOR_BASES {
            table.insert(ComponentClass::Resistor, package, base);
        }
        for (package, base) in CAPACITOR_BASES {
            table.insert(ComponentClass::Capacitor, package, base);
        }
        table
    }

    pub fn insert(
        &mut self,
        class: ComponentClass,
        package: impl Into<String>,
        base: impl Into<String>,
    ) {
        self.classes
            .entry(class)
            .or_default()
            .insert(package.into(), base.into());
    }

    /// Apply overrides for one class on top of the current entries.
    pub fn extend<I, K, V>(&mut self, class: ComponentClass, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (package, base) in entries {
            self.insert(class, package, base);
        }
    }

    pub fn lookup(&self, class: ComponentClass, package: &str) -> Option<&str> {
        self.classes
            .get(&class)
            .and_then(|packages| packages.get(package))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_covers_common_chip_sizes() {
        let table = BaseTable::builtin();
        assert_eq!(
            table.lookup(ComponentClass::Resistor, "0603"),
            Some("cbeda48c-7fb0-4cfb-a4de-d9672e8cc190")
        );
        assert_eq!(
            table.lookup(ComponentClass::Capacitor, "1210"),
            Some("ce744d78-f7d9-4997-8666-fd10d77eccb6")
        );
        // 1210 only has a capacitor base.
        assert_eq!(table.lookup(ComponentClass::Resistor, "1210"), None);
        assert_eq!(table.lookup(ComponentClass::Resistor, "0201"), None);
    }

    #[test]
    fn overrides_replace_and_add_entries() {
        let mut table = BaseTable::builtin();
        table.extend(
            ComponentClass::Resistor,
            [("0603", "override"), ("0201", "tiny")],
        );
        assert_eq!(table.lookup(ComponentClass::Resistor, "0603"), Some("override"));
        assert_eq!(table.lookup(ComponentClass::Resistor, "0201"), Some("tiny"));
        assert_eq!(table.lookup(ComponentClass::Capacitor, "0201"), None);
    }
}
