use crate::templates::{card, card_light, desktop_layout};
use maud::{html, Markup};

pub const ZONAS: [&str; 9] = [
    "Comunidad de Madrid",
    "Madrid",
    "Barcelona",
    "Málaga",
    "Valencia",
    "Alicante",
    "Islas Baleares",
    "Costa del Sol",
    "España (otras zonas)",
];

pub const VERTICALES_PROYECTOS: [&str; 7] = [
    "Residencial lujo",
    "Residencial",
    "BTR",
    "Oficinas",
    "Hoteles 4/5*",
    "Residencias estudiantes",
    "Residencias senior",
];

pub const VERTICALES_CLIENTES: [&str; 5] = [
    "Residencial lujo",
    "Residencial",
    "BTR",
    "Oficinas",
    "Hoteles",
];

pub const TIPOS_CLIENTE_BUSCADOS: [&str; 4] = [
    "Arquitectura",
    "Ingeniería",
    "Integrator Partner",
    "Promotora/Fondo",
];

const PERIODOS: [(&str, &str); 4] = [
    ("6", "Últimos 6 meses"),
    ("12", "Últimos 12 meses"),
    ("18", "Últimos 18 meses"),
    ("24", "Últimos 24 meses"),
];

pub struct BuscarVm {
    /// "proyectos" or "clientes".
    pub tipo: String,
    pub zonas: Vec<String>,
    pub verticales: Vec<String>,
    pub meses: String,
    pub min_viviendas: u32,
    pub hoteles_btr: bool,
    pub tipos_cliente: Vec<String>,
    pub top10: bool,
    pub prompt: String,
}

pub fn buscar_page(vm: &BuscarVm) -> Markup {
    let es_proyectos = vm.tipo != "clientes";
    desktop_layout(
        "Buscar",
        "/buscar",
        html! {
            (card(
                "Scouting",
                "🔎 Buscar proyectos y clientes",
                "Generador de prompts de scouting: elige parámetros y copia el prompt en tu asistente de investigación.",
            ))

            (card_light("Parámetros", html! {
                form class="formulario" action="/buscar" method="get" {
                    label { "¿Qué quieres buscar?" }
                    select name="tipo" {
                        option value="proyectos" selected[es_proyectos] { "Proyectos (obras)" }
                        option value="clientes" selected[!es_proyectos] { "Clientes (promotoras, ingenierías, integrators)" }
                    }

                    label { "🎯 Zonas objetivo" }
                    div class="form-columnas" {
                        @for zona in ZONAS {
                            @let marcada = vm.zonas.iter().any(|z| z == zona);
                            label style="margin-top: 2px;" {
                                input type="checkbox" name="zonas" value=(zona)
                                    style="width: auto; margin-right: 6px;"
                                    checked[marcada];
                                (zona)
                            }
                        }
                    }

                    @if es_proyectos {
                        label { "🏗️ Verticales" }
                        div class="form-columnas" {
                            @for vertical in VERTICALES_PROYECTOS {
                                @let marcada = vm.verticales.iter().any(|v| v == vertical);
                                label style="margin-top: 2px;" {
                                    input type="checkbox" name="verticales" value=(vertical)
                                        style="width: auto; margin-right: 6px;"
                                        checked[marcada];
                                    (vertical)
                                }
                            }
                        }
                        label for="meses" { "Periodo" }
                        select id="meses" name="meses" {
                            @for (valor, nombre) in PERIODOS {
                                option value=(valor) selected[vm.meses == valor] { (nombre) }
                            }
                        }
                        label for="min_viviendas" { "Mínimo viviendas" }
                        input type="number" id="min_viviendas" name="min_viviendas" min="0" step="10"
                            value=(vm.min_viviendas);
                        label style="margin-top: 8px;" {
                            input type="checkbox" name="hoteles_btr" value="1"
                                style="width: auto; margin-right: 6px;"
                                checked[vm.hoteles_btr];
                            "Priorizar Hoteles/BTR"
                        }
                    } @else {
                        label { "👤 Tipos de cliente" }
                        div class="form-columnas" {
                            @for tipo in TIPOS_CLIENTE_BUSCADOS {
                                @let marcado = vm.tipos_cliente.iter().any(|t| t == tipo);
                                label style="margin-top: 2px;" {
                                    input type="checkbox" name="tipos_cliente" value=(tipo)
                                        style="width: auto; margin-right: 6px;"
                                        checked[marcado];
                                    (tipo)
                                }
                            }
                        }
                        label { "Verticales asociadas" }
                        div class="form-columnas" {
                            @for vertical in VERTICALES_CLIENTES {
                                @let marcada = vm.verticales.iter().any(|v| v == vertical);
                                label style="margin-top: 2px;" {
                                    input type="checkbox" name="verticales" value=(vertical)
                                        style="width: auto; margin-right: 6px;"
                                        checked[marcada];
                                    (vertical)
                                }
                            }
                        }
                        label style="margin-top: 8px;" {
                            input type="checkbox" name="top10" value="1"
                                style="width: auto; margin-right: 6px;"
                                checked[vm.top10];
                            "Incluir TOP-10 clientes recomendados"
                        }
                    }

                    button type="submit" { "🔄 Actualizar prompt" }
                }
            }))

            (card_light("🧾 Prompt generado", html! {
                pre class="prompt" { (vm.prompt) }
            }))
        },
    )
}
