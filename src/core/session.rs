use crate::core::catalog::Catalog;
use crate::domain::model::{BudgetRow, Unit};

/// 一次編輯工作階段的已選服務，依選取順序保存
#[derive(Debug, Clone)]
pub struct BudgetSession<'c> {
    catalog: &'c Catalog,
    rows: Vec<BudgetRow>,
}

impl<'c> BudgetSession<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self {
            catalog,
            rows: Vec::new(),
        }
    }

    /// 選取服務並以目錄預設單位建立新列；已選取時不變動原列
    pub fn select(&mut self, service: &str) -> &mut BudgetRow {
        let index = match self.position(service) {
            Some(index) => index,
            None => {
                let unit = self.catalog.default_unit_for(service);
                tracing::debug!("Selected '{}' (default unit {})", service, unit);
                self.rows.push(BudgetRow::new(service, unit));
                self.rows.len() - 1
            }
        };
        &mut self.rows[index]
    }

    pub fn deselect(&mut self, service: &str) -> Option<BudgetRow> {
        let index = self.position(service)?;
        tracing::debug!("Deselected '{}'", service);
        Some(self.rows.remove(index))
    }

    /// 以新的選取清單取代目前選取。
    /// 仍被選取的列保留輸入值，順序依新清單。
    pub fn set_selection<'a, I>(&mut self, services: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut previous = std::mem::take(&mut self.rows);
        for service in services {
            if self.position(service).is_some() {
                continue;
            }
            match previous.iter().position(|row| row.service == service) {
                Some(index) => self.rows.push(previous.swap_remove(index)),
                None => {
                    self.select(service);
                }
            }
        }
    }

    pub fn row(&self, service: &str) -> Option<&BudgetRow> {
        self.rows.iter().find(|row| row.service == service)
    }

    pub fn row_mut(&mut self, service: &str) -> Option<&mut BudgetRow> {
        self.rows.iter_mut().find(|row| row.service == service)
    }

    /// 未選取的服務回傳 false
    pub fn set_unit(&mut self, service: &str, unit: Unit) -> bool {
        self.row_mut(service).map(|row| row.unit = unit).is_some()
    }

    pub fn set_quantity(&mut self, service: &str, quantity: u32) -> bool {
        self.row_mut(service).map(|row| row.quantity = quantity).is_some()
    }

    pub fn set_unit_price(&mut self, service: &str, raw: &str) -> bool {
        self.row_mut(service)
            .map(|row| row.set_unit_price(raw))
            .is_some()
    }

    pub fn rows(&self) -> &[BudgetRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    fn position(&self, service: &str) -> Option<usize> {
        self.rows.iter().position(|row| row.service == service)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_select_uses_catalog_default_and_keeps_order() {
        let catalog = Catalog::standard();
        let mut session = BudgetSession::new(&catalog);

        session.select("PINTURA");
        session.select("PONTO DE ENERGIA");
        session.select("DEMOLIÇÃO");

        let names: Vec<&str> = session.rows().iter().map(|r| r.service.as_str()).collect();
        assert_eq!(names, vec!["PINTURA", "PONTO DE ENERGIA", "DEMOLIÇÃO"]);
        assert_eq!(session.row("PONTO DE ENERGIA").unwrap().unit, Unit::Piece);
        assert_eq!(session.row("PINTURA").unwrap().unit_price_raw(), "0,00");
    }

    #[test]
    fn test_select_twice_keeps_single_row_and_values() {
        let catalog = Catalog::standard();
        let mut session = BudgetSession::new(&catalog);

        session.select("REBOCO").quantity = 3;
        session.select("REBOCO");

        assert_eq!(session.len(), 1);
        assert_eq!(session.row("REBOCO").unwrap().quantity, 3);
    }

    #[test]
    fn test_edits_and_deselect() {
        let catalog = Catalog::standard();
        let mut session = BudgetSession::new(&catalog);
        session.select("FORRO");

        assert!(session.set_unit("FORRO", Unit::Metre));
        assert!(session.set_quantity("FORRO", 2));
        assert!(session.set_unit_price("FORRO", "10,00"));
        assert!(!session.set_quantity("LIMPEZA", 1));

        let row = session.row("FORRO").unwrap();
        assert_eq!(row.unit, Unit::Metre);
        assert_eq!(row.line_total(), dec!(20.00));

        let removed = session.deselect("FORRO").unwrap();
        assert_eq!(removed.service, "FORRO");
        assert!(session.is_empty());
        assert!(session.deselect("FORRO").is_none());
    }

    #[test]
    fn test_set_selection_keeps_surviving_rows() {
        let catalog = Catalog::standard();
        let mut session = BudgetSession::new(&catalog);
        session.select("REBOCO").quantity = 7;
        session.select("FORRO");

        session.set_selection(["LIMPEZA", "REBOCO", "LIMPEZA"]);

        let names: Vec<&str> = session.rows().iter().map(|r| r.service.as_str()).collect();
        assert_eq!(names, vec!["LIMPEZA", "REBOCO"]);
        assert_eq!(session.row("REBOCO").unwrap().quantity, 7);
        assert!(session.row("FORRO").is_none());
    }
}
