//! Tab keys and their titles.
//!
//! Every page the shell can open is addressed by a string key that also ends
//! up in the `?active=` query, so keys must stay stable.

use contracts::domain::a001_documento::DocumentoId;
use contracts::domain::common::AggregateId;

const DOCUMENTO_DETAIL_PREFIX: &str = "a001_documento_detail_";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabKey {
    DocumentoList,
    DocumentoNew,
    DocumentoDetail(DocumentoId),
    FacturaVenta,
    Compra,
    NominaLiquidacion,
    Produccion,
}

impl TabKey {
    pub fn parse(key: &str) -> Option<TabKey> {
        let tab = match key {
            "a001_documento" => TabKey::DocumentoList,
            "a001_documento_new" => TabKey::DocumentoNew,
            "a006_factura_venta" => TabKey::FacturaVenta,
            "a006_compra" => TabKey::Compra,
            "a007_nomina_liquidacion" => TabKey::NominaLiquidacion,
            "a008_produccion" => TabKey::Produccion,
            k => {
                let id = k.strip_prefix(DOCUMENTO_DETAIL_PREFIX)?;
                TabKey::DocumentoDetail(DocumentoId::from_string(id).ok()?)
            }
        };
        Some(tab)
    }

    pub fn key(&self) -> String {
        match self {
            TabKey::DocumentoList => "a001_documento".into(),
            TabKey::DocumentoNew => "a001_documento_new".into(),
            TabKey::DocumentoDetail(id) => format!("{}{}", DOCUMENTO_DETAIL_PREFIX, id),
            TabKey::FacturaVenta => "a006_factura_venta".into(),
            TabKey::Compra => "a006_compra".into(),
            TabKey::NominaLiquidacion => "a007_nomina_liquidacion".into(),
            TabKey::Produccion => "a008_produccion".into(),
        }
    }

    pub fn label(&self) -> String {
        match self {
            TabKey::DocumentoList => "Documentos contables".into(),
            TabKey::DocumentoNew => "Nuevo documento".into(),
            TabKey::DocumentoDetail(id) => format!("Documento · {}", id),
            TabKey::FacturaVenta => "Factura de venta".into(),
            TabKey::Compra => "Compra".into(),
            TabKey::NominaLiquidacion => "Liquidación de nómina".into(),
            TabKey::Produccion => "Producción".into(),
        }
    }
}

/// Title for a raw key; unknown keys are shown as-is.
pub fn tab_label_for_key(key: &str) -> String {
    TabKey::parse(key)
        .map(|k| k.label())
        .unwrap_or_else(|| key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_parse_back() {
        let all = [
            TabKey::DocumentoList,
            TabKey::DocumentoNew,
            TabKey::DocumentoDetail(DocumentoId(42)),
            TabKey::FacturaVenta,
            TabKey::Compra,
            TabKey::NominaLiquidacion,
            TabKey::Produccion,
        ];
        for tab in all {
            assert_eq!(TabKey::parse(&tab.key()), Some(tab), "{}", tab.key());
        }
    }

    #[test]
    fn test_detail_key_requires_numeric_id() {
        assert_eq!(TabKey::parse("a001_documento_detail_abc"), None);
        assert_eq!(TabKey::parse("a001_documento_detail_"), None);
        assert_eq!(
            TabKey::parse("a001_documento_detail_7"),
            Some(TabKey::DocumentoDetail(DocumentoId(7)))
        );
    }

    #[test]
    fn test_unknown_key_label_falls_back_to_key() {
        assert_eq!(tab_label_for_key("a999_otro"), "a999_otro");
        assert_eq!(tab_label_for_key("a006_compra"), "Compra");
    }
}
