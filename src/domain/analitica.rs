use std::collections::HashMap;

use crate::domain::{Documento, ESTADOS_PIPELINE};

/// Default cutoff for the promoter ranking table.
pub const TOP_PROMOTORAS: usize = 10;

// States that take a project out of the active pipeline.
const ESTADOS_INACTIVOS: [&str; 2] = ["Perdido", "Paralizado"];

/// The KPI bundle shown at the top of the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct Kpis {
    pub total_proyectos: usize,
    pub total_potencial: f64,
    pub ticket_medio: f64,
    pub proyectos_activos: usize,
    /// Won projects as a percentage of the whole collection, 0..=100.
    pub ratio_ganados: f64,
}

pub fn compute_kpis(marco: &[Documento]) -> Kpis {
    if marco.is_empty() {
        return Kpis {
            total_proyectos: 0,
            total_potencial: 0.0,
            ticket_medio: 0.0,
            proyectos_activos: 0,
            ratio_ganados: 0.0,
        };
    }

    let total_proyectos = marco.len();
    let total_potencial: f64 = marco.iter().map(potencial).sum();
    let ticket_medio = total_potencial / total_proyectos as f64;

    let proyectos_activos = marco
        .iter()
        .filter(|obra| !ESTADOS_INACTIVOS.contains(&estado(obra)))
        .count();

    let ganados = marco.iter().filter(|obra| estado(obra) == "Ganado").count();
    let ratio_ganados = ganados as f64 / total_proyectos as f64 * 100.0;

    Kpis {
        total_proyectos,
        total_potencial,
        ticket_medio,
        proyectos_activos,
        ratio_ganados,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilaFunnel {
    pub estado: &'static str,
    pub proyectos: usize,
}

/// Project count per pipeline stage, always the eight canonical stages in
/// pipeline order. Stage labels match case-sensitively; rows with a label
/// outside the pipeline count toward no bucket.
pub fn funnel_estado(marco: &[Documento]) -> Vec<FilaFunnel> {
    ESTADOS_PIPELINE
        .iter()
        .map(|&etiqueta| FilaFunnel {
            estado: etiqueta,
            proyectos: marco
                .iter()
                .filter(|obra| obra.texto("estado") == Some(etiqueta))
                .count(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilaMes {
    pub anio_mes: String,
    pub proyectos: usize,
}

/// Projects created per month, keyed by the `anio_mes` column (rows
/// without one are excluded). Buckets come out chronologically when all
/// keys parse as `YYYY-MM`; otherwise the first-appearance order stands.
pub fn proyectos_por_mes(marco: &[Documento]) -> Vec<FilaMes> {
    let mut filas: Vec<FilaMes> = Vec::new();
    let mut indice: HashMap<String, usize> = HashMap::new();

    for obra in marco {
        let Some(mes) = obra.texto("anio_mes") else {
            continue;
        };
        match indice.get(mes) {
            Some(&i) => filas[i].proyectos += 1,
            None => {
                indice.insert(mes.to_string(), filas.len());
                filas.push(FilaMes {
                    anio_mes: mes.to_string(),
                    proyectos: 1,
                });
            }
        }
    }

    let claves: Option<Vec<(i32, u32)>> = filas
        .iter()
        .map(|fila| crate::domain::fechas::parsear_anio_mes(&fila.anio_mes))
        .collect();
    if let Some(claves) = claves {
        let mut con_clave: Vec<((i32, u32), FilaMes)> =
            claves.into_iter().zip(filas).collect();
        con_clave.sort_by_key(|(clave, _)| *clave);
        return con_clave.into_iter().map(|(_, fila)| fila).collect();
    }

    filas
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilaProvincia {
    pub provincia: String,
    pub proyectos: usize,
    pub potencial: f64,
}

/// Total potential and project count per province, largest potential
/// first. Provinces that trim down to an empty string are dropped.
pub fn potencial_por_provincia(marco: &[Documento]) -> Vec<FilaProvincia> {
    agrupar_potencial(marco, "provincia")
        .into_iter()
        .map(|(provincia, proyectos, potencial)| FilaProvincia {
            provincia,
            proyectos,
            potencial,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilaPromotora {
    pub promotora: String,
    pub proyectos: usize,
    pub potencial: f64,
}

/// Promoter ranking by total potential, truncated to the `top_n` best.
pub fn ranking_promotoras(marco: &[Documento], top_n: usize) -> Vec<FilaPromotora> {
    let mut filas: Vec<FilaPromotora> = agrupar_potencial(marco, "promotora_display")
        .into_iter()
        .map(|(promotora, proyectos, potencial)| FilaPromotora {
            promotora,
            proyectos,
            potencial,
        })
        .collect();
    filas.truncate(top_n);
    filas
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilaPrioridad {
    pub prioridad: String,
    pub proyectos: usize,
}

/// Project count per priority, every observed value included, in order
/// of first appearance.
pub fn conteo_prioridades(marco: &[Documento]) -> Vec<FilaPrioridad> {
    let mut filas: Vec<FilaPrioridad> = Vec::new();
    let mut indice: HashMap<String, usize> = HashMap::new();

    for obra in marco {
        let prioridad = obra.mostrar("prioridad", "");
        match indice.get(&prioridad) {
            Some(&i) => filas[i].proyectos += 1,
            None => {
                indice.insert(prioridad.clone(), filas.len());
                filas.push(FilaPrioridad {
                    prioridad,
                    proyectos: 1,
                });
            }
        }
    }

    filas
}

/// The raw potential series, one value per row, for histograms.
pub fn serie_potencial(marco: &[Documento]) -> Vec<f64> {
    marco.iter().map(potencial).collect()
}

/// Group rows by a display column, accumulating count and potential.
/// Groups whose key trims to empty are excluded; the rest keep their
/// first-appearance order, then sort by potential descending (the sort
/// is stable, so ties stay in appearance order and re-renders never
/// flicker).
fn agrupar_potencial(marco: &[Documento], columna: &str) -> Vec<(String, usize, f64)> {
    let mut grupos: Vec<(String, usize, f64)> = Vec::new();
    let mut indice: HashMap<String, usize> = HashMap::new();

    for obra in marco {
        let clave = obra.mostrar(columna, "");
        match indice.get(&clave) {
            Some(&i) => {
                grupos[i].1 += 1;
                grupos[i].2 += potencial(obra);
            }
            None => {
                indice.insert(clave.clone(), grupos.len());
                grupos.push((clave, 1, potencial(obra)));
            }
        }
    }

    grupos.retain(|(clave, _, _)| !clave.trim().is_empty());
    grupos.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));
    grupos
}

fn potencial(obra: &Documento) -> f64 {
    obra.numero("potencial_eur").unwrap_or(0.0)
}

fn estado(obra: &Documento) -> &str {
    obra.texto("estado").unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::normalizar::normalizar_proyectos;
    use serde_json::{json, Value};

    fn doc(v: Value) -> Documento {
        match v {
            Value::Object(m) => Documento::from(m),
            _ => panic!("expected a JSON object"),
        }
    }

    fn marco(filas: Vec<Value>) -> Vec<Documento> {
        normalizar_proyectos(Some(filas.into_iter().map(doc).collect()))
    }

    #[test]
    fn kpis_de_marco_vacio_son_todo_ceros() {
        let kpis = compute_kpis(&[]);
        assert_eq!(kpis.total_proyectos, 0);
        assert_eq!(kpis.total_potencial, 0.0);
        assert_eq!(kpis.ticket_medio, 0.0);
        assert_eq!(kpis.proyectos_activos, 0);
        assert_eq!(kpis.ratio_ganados, 0.0);
    }

    #[test]
    fn kpis_de_un_proyecto_ganado() {
        let kpis = compute_kpis(&marco(vec![json!({
            "id": "a",
            "estado": "Ganado",
            "potencial_eur": 1000,
            "fecha_creacion": "2024-03-15",
        })]));

        assert_eq!(kpis.total_proyectos, 1);
        assert_eq!(kpis.total_potencial, 1000.0);
        assert_eq!(kpis.ticket_medio, 1000.0);
        assert_eq!(kpis.proyectos_activos, 1);
        assert_eq!(kpis.ratio_ganados, 100.0);
    }

    #[test]
    fn activos_excluye_perdidos_y_paralizados() {
        let m = marco(vec![
            json!({"id": "a", "estado": "Perdido"}),
            json!({"id": "b", "estado": "Paralizado"}),
            json!({"id": "c", "estado": "Negociación"}),
            json!({"id": "d", "estado": "FooBar"}),
        ]);
        let kpis = compute_kpis(&m);

        assert_eq!(kpis.proyectos_activos, 2);
        // Active + inactive always add back up to the total.
        assert_eq!(kpis.proyectos_activos + 2, kpis.total_proyectos);
        assert_eq!(kpis.ratio_ganados, 0.0);
    }

    #[test]
    fn kpis_toleran_potencial_negativo() {
        let kpis = compute_kpis(&marco(vec![
            json!({"id": "a", "potencial_eur": -500}),
            json!({"id": "b", "potencial_eur": 1500}),
        ]));
        assert_eq!(kpis.total_potencial, 1000.0);
        assert_eq!(kpis.ticket_medio, 500.0);
    }

    #[test]
    fn funnel_siempre_trae_las_ocho_etapas_en_orden() {
        let vacio = funnel_estado(&[]);
        assert_eq!(vacio.len(), 8);
        assert!(vacio.iter().all(|fila| fila.proyectos == 0));
        let etiquetas: Vec<&str> = vacio.iter().map(|f| f.estado).collect();
        assert_eq!(etiquetas, ESTADOS_PIPELINE.to_vec());
    }

    #[test]
    fn funnel_ignora_estados_desconocidos() {
        let filas = funnel_estado(&marco(vec![
            json!({"id": "a", "estado": "FooBar"}),
            json!({"id": "b", "estado": "Ganado"}),
            json!({"id": "c", "estado": "ganado"}),
        ]));

        assert_eq!(filas.len(), 8);
        let ganado = filas.iter().find(|f| f.estado == "Ganado").unwrap();
        // Match is case-sensitive: "ganado" is not a stage.
        assert_eq!(ganado.proyectos, 1);
        assert_eq!(filas.iter().map(|f| f.proyectos).sum::<usize>(), 1);
    }

    #[test]
    fn meses_en_orden_cronologico_y_sin_fechas_perdidas() {
        let filas = proyectos_por_mes(&marco(vec![
            json!({"id": "a", "fecha_creacion": "2024-11-02"}),
            json!({"id": "b", "fecha_creacion": "2023-05-20"}),
            json!({"id": "c", "fecha_creacion": "2024-11-28"}),
            json!({"id": "d"}),
        ]));

        assert_eq!(
            filas,
            vec![
                FilaMes { anio_mes: "2023-05".into(), proyectos: 1 },
                FilaMes { anio_mes: "2024-11".into(), proyectos: 2 },
            ]
        );
    }

    #[test]
    fn meses_ilegibles_conservan_orden_de_aparicion() {
        // `anio_mes` can only hold junk when the frame skipped the
        // normalizer; the series must then leave the order alone.
        let filas = proyectos_por_mes(&[
            doc(json!({"id": "a", "anio_mes": "luego"})),
            doc(json!({"id": "b", "anio_mes": "2023-01"})),
        ]);

        assert_eq!(filas[0].anio_mes, "luego");
        assert_eq!(filas[1].anio_mes, "2023-01");
    }

    #[test]
    fn provincias_agregadas_y_ordenadas_por_potencial() {
        let filas = potencial_por_provincia(&marco(vec![
            json!({"id": "a", "provincia": "Madrid", "potencial_eur": 100}),
            json!({"id": "b", "provincia": "Madrid", "potencial_eur": 50}),
            json!({"id": "c", "provincia": "Barcelona", "potencial_eur": 200}),
        ]));

        assert_eq!(
            filas,
            vec![
                FilaProvincia { provincia: "Barcelona".into(), proyectos: 1, potencial: 200.0 },
                FilaProvincia { provincia: "Madrid".into(), proyectos: 2, potencial: 150.0 },
            ]
        );
    }

    #[test]
    fn provincias_vacias_quedan_fuera() {
        let filas = potencial_por_provincia(&marco(vec![
            json!({"id": "a", "potencial_eur": 100}),
            json!({"id": "b", "provincia": "  ", "potencial_eur": 100}),
        ]));
        assert!(filas.is_empty());
    }

    #[test]
    fn empates_de_potencial_respetan_el_orden_de_aparicion() {
        let filas = potencial_por_provincia(&marco(vec![
            json!({"id": "a", "provincia": "Sevilla", "potencial_eur": 100}),
            json!({"id": "b", "provincia": "Cádiz", "potencial_eur": 100}),
        ]));
        assert_eq!(filas[0].provincia, "Sevilla");
        assert_eq!(filas[1].provincia, "Cádiz");
    }

    #[test]
    fn ranking_de_promotoras_trunca_al_top_n() {
        let filas: Vec<Value> = (1..=12)
            .map(|i| {
                json!({
                    "id": format!("p{i}"),
                    "cliente_principal": format!("Promotora {i}"),
                    "potencial_eur": i * 1000,
                })
            })
            .collect();
        let ranking = ranking_promotoras(&marco(filas), TOP_PROMOTORAS);

        assert_eq!(ranking.len(), 10);
        assert_eq!(ranking[0].promotora, "Promotora 12");
        assert_eq!(ranking[0].potencial, 12000.0);
        assert_eq!(ranking[9].potencial, 3000.0);
        assert!(ranking.windows(2).all(|par| par[0].potencial >= par[1].potencial));
    }

    #[test]
    fn ranking_excluye_promotoras_sin_nombre() {
        let ranking = ranking_promotoras(
            &marco(vec![
                json!({"id": "a", "potencial_eur": 900}),
                json!({"id": "b", "cliente_principal": "Neinor", "potencial_eur": 1}),
            ]),
            TOP_PROMOTORAS,
        );
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].promotora, "Neinor");
    }

    #[test]
    fn prioridades_cuentan_todos_los_valores_observados() {
        let filas = conteo_prioridades(&marco(vec![
            json!({"id": "a", "prioridad": "Alta"}),
            json!({"id": "b"}),
            json!({"id": "c", "prioridad": "Alta"}),
            json!({"id": "d", "prioridad": "Bajísima"}),
        ]));

        assert_eq!(
            filas,
            vec![
                FilaPrioridad { prioridad: "Alta".into(), proyectos: 2 },
                FilaPrioridad { prioridad: "Media".into(), proyectos: 1 },
                FilaPrioridad { prioridad: "Bajísima".into(), proyectos: 1 },
            ]
        );
    }

    #[test]
    fn serie_potencial_una_cifra_por_fila() {
        assert_eq!(serie_potencial(&[]), Vec::<f64>::new());
        let serie = serie_potencial(&marco(vec![
            json!({"id": "a", "potencial_eur": 100}),
            json!({"id": "b"}),
            json!({"id": "c", "potencial_eur": -5}),
        ]));
        assert_eq!(serie, vec![100.0, 0.0, -5.0]);
    }

    #[test]
    fn suma_de_kpis_coincide_con_la_serie() {
        let m = marco(vec![
            json!({"id": "a", "potencial_eur": 120.5}),
            json!({"id": "b", "potencial_eur": "300"}),
            json!({"id": "c", "potencial_eur": "rota"}),
        ]);
        let kpis = compute_kpis(&m);
        let suma: f64 = serie_potencial(&m).iter().sum();
        assert_eq!(kpis.total_potencial, suma);
    }
}
