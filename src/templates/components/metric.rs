use maud::{html, Markup};

/// One KPI tile.
pub fn metric(etiqueta: &str, valor: &str) -> Markup {
    html! {
        div class="metrica" {
            div class="etiqueta" { (etiqueta) }
            div class="valor" { (valor) }
        }
    }
}
