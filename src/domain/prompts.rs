//! Builders for the scouting prompts of the "Buscar" page. The page does
//! not query anything itself; it hands the user a ready-made prompt to
//! paste into their research assistant.

fn lista_o(valores: &[String], defecto: &str) -> String {
    if valores.is_empty() {
        defecto.to_string()
    } else {
        valores.join(", ")
    }
}

/// Prompt for scouting construction projects.
pub fn prompt_proyectos(
    zonas: &[String],
    verticales: &[String],
    meses: &str,
    min_viviendas: u32,
    priorizar_hoteles_btr: bool,
) -> String {
    let zonas_txt = lista_o(zonas, "toda España");
    let verticales_txt = lista_o(verticales, "residencial, oficinas y hoteles");

    let rango_tiempo_txt = match meses {
        "6" => "los últimos 6 meses",
        "18" => "los últimos 18 meses",
        "24" => "los últimos 24 meses",
        _ => "los últimos 12 meses",
    };

    let mut extras = String::new();
    if min_viviendas > 0 {
        extras.push_str(&format!(
            "\n   - con un mínimo de {min_viviendas} viviendas."
        ));
    }
    if priorizar_hoteles_btr {
        extras.push_str(
            "\n   - prioriza hoteles 4/5* y BTR con potencial de control de accesos.",
        );
    }

    format!(
        "Quiero que actúes como mi agente de scouting de proyectos inmobiliarios.

PARÁMETROS ELEGIDOS:
- Zonas objetivo: {zonas_txt}
- Tipos de proyecto: {verticales_txt}
- Periodo: {rango_tiempo_txt}{extras}

TAREA:
1. Busca proyectos relevantes (fase proyecto, comercialización o construcción).
2. Devuelve tabla Markdown con columnas EXACTAS:

   - Proyecto
   - Ciudad
   - Provincia
   - Comunidad_Autonoma
   - País
   - Tipo_Proyecto
   - Segmento
   - Nº_Viviendas
   - Promotora_Fondo
   - Arquitectura
   - Ingenieria
   - Estado
   - Fecha_Inicio_Estimada
   - Fecha_Entrega_Estimada
   - Fuente_URL
   - Notas

3. No inventes datos: deja vacío si no hay info.
4. Añade resumen final y Top 5 proyectos prioritarios."
    )
}

/// Prompt for scouting client companies.
pub fn prompt_clientes(
    zonas: &[String],
    tipos_cliente: &[String],
    verticales: &[String],
    incluir_top10: bool,
) -> String {
    let zonas_txt = lista_o(zonas, "toda España");
    let tipos_txt = lista_o(tipos_cliente, "Arquitectura, Ingeniería, Integrators");
    let verticales_txt = lista_o(verticales, "residencial, BTR, oficinas, hoteles");

    let extra_top = if incluir_top10 {
        "\n5. Añade un ranking TOP 10 empresas prioritarias."
    } else {
        ""
    };

    format!(
        "Actúa como asistente de desarrollo de canal comercial.

PARÁMETROS:
- Zonas objetivo: {zonas_txt}
- Tipos de cliente buscados: {tipos_txt}
- Verticales: {verticales_txt}

TAREA:
1. Busca empresas relevantes asociadas a proyectos recientes.
2. Devuelve tabla Markdown con columnas exactas:

   - Empresa
   - Tipo_Cliente
   - Ciudad
   - Provincia
   - País
   - Web
   - Email_Contacto
   - Teléfono
   - Persona_Contacto
   - Cargo
   - Segmento_Objetivo
   - Fuente_URL
   - Notas{extra_top}"
    )
}
