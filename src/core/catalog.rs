use crate::domain::model::{ServiceCatalogEntry, Unit};

const STANDARD_SERVICES: [(&str, &str); 12] = [
    ("DEMOLIÇÃO", "m²"),
    ("LIMPEZA", "m²"),
    ("IMPERMEABILIZAÇÃO (MANTA)", "m²"),
    ("REBOCO", "m²"),
    ("CONTRA-PISO", "m²"),
    ("REVESTIMENTO", "m²"),
    ("REJUNTE", "m²"),
    ("PONTO DE ENERGIA", "un"),
    ("FORRO", "m²"),
    ("RESTAURAÇÃO", "m²"),
    ("EMASSAMENTO", "m²"),
    ("PINTURA", "m²"),
];

/// 服務目錄：名稱唯一，保持定義順序
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<ServiceCatalogEntry>,
}

impl Catalog {
    pub fn standard() -> Self {
        Self::with_entries(
            STANDARD_SERVICES
                .iter()
                .map(|(name, unit)| ServiceCatalogEntry::new(*name, *unit)),
        )
    }

    pub fn with_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = ServiceCatalogEntry>,
    {
        let mut catalog = Self {
            entries: Vec::new(),
        };
        catalog.extend(entries);
        catalog
    }

    /// 同名項目覆寫原本的預設單位，位置不變
    pub fn extend<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = ServiceCatalogEntry>,
    {
        for entry in entries {
            match self.entries.iter_mut().find(|e| e.name == entry.name) {
                Some(existing) => existing.default_unit = entry.default_unit,
                None => self.entries.push(entry),
            }
        }
    }

    pub fn get(&self, service: &str) -> Option<&ServiceCatalogEntry> {
        self.entries.iter().find(|e| e.name == service)
    }

    pub fn entries(&self) -> &[ServiceCatalogEntry] {
        &self.entries
    }

    pub fn service_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// 未知服務或預設單位不在可選單位內時，退回 `Unit::ALL[0]`
    pub fn default_unit_for(&self, service: &str) -> Unit {
        match self.get(service) {
            Some(entry) => entry.default_unit.parse::<Unit>().unwrap_or_else(|_| {
                tracing::warn!(
                    "⚠️ Default unit '{}' of '{}' is not selectable, using '{}'",
                    entry.default_unit,
                    service,
                    Unit::fallback()
                );
                Unit::fallback()
            }),
            None => {
                tracing::warn!(
                    "⚠️ Service '{}' is not in the catalog, using '{}'",
                    service,
                    Unit::fallback()
                );
                Unit::fallback()
            }
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_defaults() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.entries().len(), 12);
        assert_eq!(catalog.default_unit_for("REBOCO"), Unit::SquareMetre);
        assert_eq!(catalog.default_unit_for("PONTO DE ENERGIA"), Unit::Piece);
        assert_eq!(catalog.service_names().next(), Some("DEMOLIÇÃO"));
        assert_eq!(catalog.service_names().last(), Some("PINTURA"));
    }

    #[test]
    fn test_unknown_service_falls_back_to_first_unit() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.default_unit_for("TELHADO"), Unit::Millimetre);
        assert_eq!(catalog.default_unit_for(""), Unit::ALL[0]);
    }

    #[test]
    fn test_unselectable_default_unit_falls_back() {
        let catalog = Catalog::with_entries([ServiceCatalogEntry::new("GESSO", "saco")]);
        assert!(catalog.get("GESSO").is_some());
        assert_eq!(catalog.default_unit_for("GESSO"), Unit::Millimetre);
    }

    #[test]
    fn test_extend_replaces_default_in_place() {
        let mut catalog = Catalog::standard();
        catalog.extend([
            ServiceCatalogEntry::new("FORRO", "m"),
            ServiceCatalogEntry::new("GESSO", "kg"),
        ]);

        assert_eq!(catalog.entries().len(), 13);
        assert_eq!(catalog.default_unit_for("FORRO"), Unit::Metre);
        assert_eq!(catalog.entries()[8].name, "FORRO");
        assert_eq!(catalog.default_unit_for("GESSO"), Unit::Kilogram);
    }
}
