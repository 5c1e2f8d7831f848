use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

crate::entity_id!(
    /// Id of an employee on the payroll
    EmpleadoId
);

crate::entity_id!(
    /// Id of a saved liquidation
    LiquidacionId
);

/// Row of `GET /nomina/empleados`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmpleadoNomina {
    pub id: EmpleadoId,
    /// Cédula
    pub documento: String,
    pub nombre: String,
    #[serde(default)]
    pub cargo: Option<String>,
    pub salario_base: f64,
    #[serde(default = "activo_default")]
    pub activo: bool,
}

fn activo_default() -> bool {
    true
}

/// How a month is split into payroll periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modalidad {
    #[default]
    Mensual,
    PrimeraQuincena,
    SegundaQuincena,
}

impl Modalidad {
    pub const TODAS: [Modalidad; 3] = [
        Modalidad::Mensual,
        Modalidad::PrimeraQuincena,
        Modalidad::SegundaQuincena,
    ];

    pub fn codigo(&self) -> &'static str {
        match self {
            Modalidad::Mensual => "mes",
            Modalidad::PrimeraQuincena => "q1",
            Modalidad::SegundaQuincena => "q2",
        }
    }

    pub fn from_codigo(codigo: &str) -> Self {
        Self::TODAS
            .into_iter()
            .find(|m| m.codigo() == codigo)
            .unwrap_or_default()
    }

    pub fn etiqueta(&self) -> &'static str {
        match self {
            Modalidad::Mensual => "Mes completo",
            Modalidad::PrimeraQuincena => "Primera quincena",
            Modalidad::SegundaQuincena => "Segunda quincena",
        }
    }
}

/// Liquidation period, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Periodo {
    pub inicio: NaiveDate,
    pub fin: NaiveDate,
}

impl Periodo {
    /// Whole calendar month.
    pub fn mes(year: i32, month: u32) -> Option<Self> {
        let inicio = NaiveDate::from_ymd_opt(year, month, 1)?;
        let siguiente = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        Some(Self {
            inicio,
            fin: siguiente.pred_opt()?,
        })
    }

    /// First (1-15) or second (16-end) fortnight of a month.
    pub fn quincena(year: i32, month: u32, segunda: bool) -> Option<Self> {
        let mes = Self::mes(year, month)?;
        Some(if segunda {
            Self {
                inicio: NaiveDate::from_ymd_opt(year, month, 16)?,
                fin: mes.fin,
            }
        } else {
            Self {
                inicio: mes.inicio,
                fin: NaiveDate::from_ymd_opt(year, month, 15)?,
            }
        })
    }

    /// Period from an `<input type="month">` value (`YYYY-MM`).
    pub fn desde_mes(raw: &str, modalidad: Modalidad) -> Option<Self> {
        let (year, month) = raw.trim().split_once('-')?;
        let year: i32 = year.parse().ok()?;
        let month: u32 = month.parse().ok()?;
        match modalidad {
            Modalidad::Mensual => Self::mes(year, month),
            Modalidad::PrimeraQuincena => Self::quincena(year, month, false),
            Modalidad::SegundaQuincena => Self::quincena(year, month, true),
        }
    }

    pub fn es_valido(&self) -> bool {
        self.inicio <= self.fin
    }

    /// Payroll days, counting every month as 30 days.
    pub fn dias(&self) -> u32 {
        if !self.es_valido() {
            return 0;
        }
        let dia_fin = if self.fin.day() >= 30 || self.es_fin_de_mes() {
            30
        } else {
            self.fin.day()
        };
        let meses = (self.fin.year() - self.inicio.year()) * 12 + self.fin.month() as i32
            - self.inicio.month() as i32;
        let inicio = self.inicio.day().min(30);
        (meses * 30 + dia_fin as i32 - inicio as i32 + 1).max(0) as u32
    }

    fn es_fin_de_mes(&self) -> bool {
        self.fin.succ_opt().map(|d| d.day() == 1).unwrap_or(true)
    }
}

/// Body of `POST /nomina/liquidacion/preview` and `POST /nomina/liquidacion`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquidacionRequest {
    pub empleado_id: EmpleadoId,
    pub periodo_inicio: NaiveDate,
    pub periodo_fin: NaiveDate,
    pub dias_trabajados: u32,
    #[serde(default)]
    pub horas_extra: f64,
    #[serde(default)]
    pub otros_devengos: f64,
    #[serde(default)]
    pub otras_deducciones: f64,
}

impl LiquidacionRequest {
    pub fn para(empleado_id: EmpleadoId, periodo: Periodo) -> Self {
        Self {
            empleado_id,
            periodo_inicio: periodo.inicio,
            periodo_fin: periodo.fin,
            dias_trabajados: periodo.dias(),
            horas_extra: 0.0,
            otros_devengos: 0.0,
            otras_deducciones: 0.0,
        }
    }
}

/// Response of the preview endpoint; the backend applies labor law.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquidacionPreview {
    pub empleado_id: EmpleadoId,
    pub devengado: f64,
    pub deducciones: f64,
    pub neto: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquidacionSaved {
    pub id: LiquidacionId,
    pub empleado_id: EmpleadoId,
    #[serde(default)]
    pub neto: f64,
}

/// Row of `GET /nomina/historial`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorialLiquidacion {
    pub id: LiquidacionId,
    pub empleado_id: EmpleadoId,
    pub empleado: String,
    #[serde(default)]
    pub documento: String,
    pub periodo_inicio: NaiveDate,
    pub periodo_fin: NaiveDate,
    pub neto: f64,
}

impl HistorialLiquidacion {
    pub fn periodo(&self) -> Periodo {
        Periodo {
            inicio: self.periodo_inicio,
            fin: self.periodo_fin,
        }
    }
}

/// File name of a pay stub PDF: `desprendible_{documento}_{inicio}_{fin}.pdf`.
pub fn desprendible_filename(documento: &str, periodo: &Periodo) -> String {
    let doc: String = documento
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    format!(
        "desprendible_{}_{}_{}.pdf",
        if doc.is_empty() { "empleado" } else { &doc },
        periodo.inicio.format("%Y%m%d"),
        periodo.fin.format("%Y%m%d")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periodo_mes() {
        let p = Periodo::mes(2026, 2).unwrap();
        assert_eq!(p.fin, NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
        assert_eq!(p.dias(), 30);
        let p = Periodo::mes(2026, 12).unwrap();
        assert_eq!(p.fin, NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
        assert_eq!(p.dias(), 30);
        assert!(Periodo::mes(2026, 13).is_none());
    }

    #[test]
    fn test_periodo_quincena() {
        let p = Periodo::quincena(2026, 10, false).unwrap();
        assert_eq!(p.dias(), 15);
        let p = Periodo::quincena(2026, 10, true).unwrap();
        assert_eq!(p.inicio.day(), 16);
        assert_eq!(p.dias(), 15);
    }

    #[test]
    fn test_periodo_desde_mes_input() {
        let p = Periodo::desde_mes("2026-10", Modalidad::SegundaQuincena).unwrap();
        assert_eq!(p.inicio, NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
        assert_eq!(p.fin, NaiveDate::from_ymd_opt(2026, 10, 31).unwrap());
        assert_eq!(Modalidad::from_codigo("q1"), Modalidad::PrimeraQuincena);
        assert_eq!(Modalidad::from_codigo("??"), Modalidad::Mensual);
        assert!(Periodo::desde_mes("", Modalidad::Mensual).is_none());
        assert!(Periodo::desde_mes("2026-00", Modalidad::Mensual).is_none());
    }

    #[test]
    fn test_periodo_invertido() {
        let p = Periodo {
            inicio: NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
            fin: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
        };
        assert!(!p.es_valido());
        assert_eq!(p.dias(), 0);
    }

    #[test]
    fn test_desprendible_filename_is_deterministic() {
        let p = Periodo::mes(2026, 9).unwrap();
        assert_eq!(
            desprendible_filename("1.020.333.444", &p),
            "desprendible_1020333444_20260901_20260930.pdf"
        );
        assert_eq!(
            desprendible_filename("", &p),
            "desprendible_empleado_20260901_20260930.pdf"
        );
    }

    #[test]
    fn test_empleado_defaults_active() {
        let e: EmpleadoNomina = serde_json::from_str(
            r#"{"id": 3, "documento": "1020", "nombre": "Ana Ruiz", "salario_base": 1423500}"#,
        )
        .unwrap();
        assert!(e.activo);
        assert_eq!(e.cargo, None);
    }
}
