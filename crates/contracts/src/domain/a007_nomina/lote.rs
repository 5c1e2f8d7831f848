//! Status tracking for bulk simulate/save over selected employees.
//!
//! Every selected row is sent as its own request; results arrive in any order
//! and are applied one by one. There is no rollback: a batch can end with some
//! rows saved and others in error.

use super::aggregate::{EmpleadoId, EmpleadoNomina, LiquidacionId, LiquidacionPreview, LiquidacionSaved};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum EstadoFila {
    #[default]
    Pendiente,
    Procesando,
    /// Net pay returned by the preview
    Simulado(f64),
    Guardado(LiquidacionId),
    Error(String),
}

impl EstadoFila {
    pub fn etiqueta(&self) -> String {
        match self {
            EstadoFila::Pendiente => "Pendiente".into(),
            EstadoFila::Procesando => "Procesando…".into(),
            EstadoFila::Simulado(_) => "Simulado".into(),
            EstadoFila::Guardado(id) => format!("Guardado #{}", id),
            EstadoFila::Error(msg) => msg.clone(),
        }
    }
}

/// Successful outcome of one row's request.
#[derive(Debug, Clone, PartialEq)]
pub enum Resultado {
    Simulado(LiquidacionPreview),
    Guardado(LiquidacionSaved),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilaLote {
    pub empleado: EmpleadoNomina,
    pub seleccionado: bool,
    pub estado: EstadoFila,
    pub preview: Option<LiquidacionPreview>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResumenLote {
    pub exitosos: usize,
    pub errores: usize,
    pub en_curso: usize,
}

impl ResumenLote {
    pub fn mensaje(&self) -> String {
        if self.errores == 0 {
            format!("{} liquidaciones procesadas", self.exitosos)
        } else {
            format!(
                "{} liquidaciones procesadas, {} con error",
                self.exitosos, self.errores
            )
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoteLiquidacion {
    pub filas: Vec<FilaLote>,
    /// Rows of the current simulate/save run; [`LoteLiquidacion::resumen`] counts only these
    corrida: Vec<EmpleadoId>,
}

impl LoteLiquidacion {
    pub fn new(empleados: Vec<EmpleadoNomina>) -> Self {
        Self {
            filas: empleados
                .into_iter()
                .filter(|e| e.activo)
                .map(|empleado| FilaLote {
                    empleado,
                    seleccionado: false,
                    estado: EstadoFila::Pendiente,
                    preview: None,
                })
                .collect(),
            corrida: Vec::new(),
        }
    }

    pub fn toggle(&mut self, id: EmpleadoId) {
        if let Some(f) = self.fila_mut(id) {
            f.seleccionado = !f.seleccionado;
        }
    }

    pub fn seleccionar_todos(&mut self, valor: bool) {
        for f in &mut self.filas {
            f.seleccionado = valor;
        }
    }

    pub fn todos_seleccionados(&self) -> bool {
        !self.filas.is_empty() && self.filas.iter().all(|f| f.seleccionado)
    }

    /// Selected rows not already being processed.
    pub fn seleccionados(&self) -> Vec<EmpleadoId> {
        self.filas
            .iter()
            .filter(|f| f.seleccionado && f.estado != EstadoFila::Procesando)
            .map(|f| f.empleado.id)
            .collect()
    }

    /// Start a run over `ids`. A run started while another is still in
    /// flight joins it, so the final summary covers both.
    pub fn marcar_procesando(&mut self, ids: &[EmpleadoId]) {
        if !self.en_curso() {
            self.corrida.clear();
        }
        for id in ids {
            if !self.corrida.contains(id) {
                self.corrida.push(*id);
            }
        }
        for f in &mut self.filas {
            if ids.contains(&f.empleado.id) {
                f.estado = EstadoFila::Procesando;
            }
        }
    }

    /// Apply one row's outcome. Unknown ids are ignored.
    pub fn aplicar_resultado(&mut self, id: EmpleadoId, resultado: Result<Resultado, String>) {
        let Some(f) = self.fila_mut(id) else {
            return;
        };
        match resultado {
            Ok(Resultado::Simulado(preview)) => {
                f.estado = EstadoFila::Simulado(preview.neto);
                f.preview = Some(preview);
            }
            Ok(Resultado::Guardado(saved)) => {
                f.estado = EstadoFila::Guardado(saved.id);
                // Saved rows leave the selection so a second click does not duplicate them
                f.seleccionado = false;
            }
            Err(msg) => f.estado = EstadoFila::Error(msg),
        }
    }

    pub fn resumen(&self) -> ResumenLote {
        self.filas
            .iter()
            .filter(|f| self.corrida.contains(&f.empleado.id))
            .fold(ResumenLote::default(), |mut r, f| {
                match f.estado {
                    EstadoFila::Simulado(_) | EstadoFila::Guardado(_) => r.exitosos += 1,
                    EstadoFila::Error(_) => r.errores += 1,
                    EstadoFila::Procesando => r.en_curso += 1,
                    EstadoFila::Pendiente => {}
                }
                r
            })
    }

    pub fn en_curso(&self) -> bool {
        self.resumen().en_curso > 0
    }

    pub fn total_neto(&self) -> f64 {
        self.filas
            .iter()
            .filter_map(|f| f.preview.as_ref().map(|p| p.neto))
            .sum()
    }

    fn fila_mut(&mut self, id: EmpleadoId) -> Option<&mut FilaLote> {
        self.filas.iter_mut().find(|f| f.empleado.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empleado(id: i64, activo: bool) -> EmpleadoNomina {
        EmpleadoNomina {
            id: EmpleadoId(id),
            documento: format!("10{}", id),
            nombre: format!("Empleado {}", id),
            cargo: None,
            salario_base: 1_423_500.0,
            activo,
        }
    }

    fn lote() -> LoteLiquidacion {
        LoteLiquidacion::new(vec![empleado(1, true), empleado(2, true), empleado(3, true)])
    }

    #[test]
    fn test_inactive_employees_are_skipped() {
        let l = LoteLiquidacion::new(vec![empleado(1, true), empleado(2, false)]);
        assert_eq!(l.filas.len(), 1);
    }

    #[test]
    fn test_partial_success_leaves_mixed_batch() {
        let mut l = lote();
        l.seleccionar_todos(true);
        let ids = l.seleccionados();
        l.marcar_procesando(&ids);
        assert!(l.en_curso());
        assert!(l.seleccionados().is_empty());

        // Results arrive out of order
        l.aplicar_resultado(
            EmpleadoId(3),
            Ok(Resultado::Guardado(LiquidacionSaved {
                id: LiquidacionId(90),
                empleado_id: EmpleadoId(3),
                neto: 1_300_000.0,
            })),
        );
        l.aplicar_resultado(EmpleadoId(1), Err("Empleado sin contrato vigente".into()));
        assert_eq!(
            l.resumen(),
            ResumenLote {
                exitosos: 1,
                errores: 1,
                en_curso: 1
            }
        );

        l.aplicar_resultado(
            EmpleadoId(2),
            Ok(Resultado::Simulado(LiquidacionPreview {
                empleado_id: EmpleadoId(2),
                devengado: 1_500_000.0,
                deducciones: 120_000.0,
                neto: 1_380_000.0,
            })),
        );
        assert!(!l.en_curso());
        assert_eq!(l.filas[0].estado, EstadoFila::Error("Empleado sin contrato vigente".into()));
        assert_eq!(l.filas[1].estado, EstadoFila::Simulado(1_380_000.0));
        assert_eq!(l.filas[2].estado, EstadoFila::Guardado(LiquidacionId(90)));
        assert!(!l.filas[2].seleccionado);
        assert_eq!(l.resumen().mensaje(), "2 liquidaciones procesadas, 1 con error");
        assert_eq!(l.total_neto(), 1_380_000.0);
    }

    #[test]
    fn test_summary_counts_only_the_latest_run() {
        let mut l = lote();
        l.seleccionar_todos(true);
        let ids = l.seleccionados();
        l.marcar_procesando(&ids);
        for id in ids {
            l.aplicar_resultado(
                id,
                Ok(Resultado::Simulado(LiquidacionPreview {
                    empleado_id: id,
                    devengado: 1_500_000.0,
                    deducciones: 120_000.0,
                    neto: 1_380_000.0,
                })),
            );
        }
        assert_eq!(l.resumen().mensaje(), "3 liquidaciones procesadas");

        l.seleccionar_todos(false);
        l.toggle(EmpleadoId(1));
        let ids = l.seleccionados();
        l.marcar_procesando(&ids);
        l.aplicar_resultado(EmpleadoId(1), Err("Periodo cerrado".into()));
        assert_eq!(
            l.resumen(),
            ResumenLote {
                exitosos: 0,
                errores: 1,
                en_curso: 0
            }
        );
        assert_eq!(l.resumen().mensaje(), "0 liquidaciones procesadas, 1 con error");
        // Earlier simulations stay visible on their rows
        assert_eq!(l.filas[1].estado, EstadoFila::Simulado(1_380_000.0));
    }

    #[test]
    fn test_overlapping_runs_are_summarized_together() {
        let mut l = lote();
        l.toggle(EmpleadoId(1));
        let primera = l.seleccionados();
        l.marcar_procesando(&primera);
        l.toggle(EmpleadoId(2));
        let segunda = l.seleccionados();
        assert_eq!(segunda, vec![EmpleadoId(2)]);
        l.marcar_procesando(&segunda);

        l.aplicar_resultado(EmpleadoId(1), Err("Sin contrato".into()));
        assert!(l.en_curso());
        l.aplicar_resultado(
            EmpleadoId(2),
            Ok(Resultado::Guardado(LiquidacionSaved {
                id: LiquidacionId(7),
                empleado_id: EmpleadoId(2),
                neto: 1_000_000.0,
            })),
        );
        assert!(!l.en_curso());
        assert_eq!(l.resumen().mensaje(), "1 liquidaciones procesadas, 1 con error");
    }

    #[test]
    fn test_toggle_selection() {
        let mut l = lote();
        l.toggle(EmpleadoId(2));
        assert_eq!(l.seleccionados(), vec![EmpleadoId(2)]);
        assert!(!l.todos_seleccionados());
        l.seleccionar_todos(true);
        assert!(l.todos_seleccionados());
    }
}
