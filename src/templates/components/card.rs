use maud::{html, Markup};

/// Headline card with the little section badge, used at the top of each
/// page.
pub fn card(badge: &str, titulo: &str, descripcion: &str) -> Markup {
    html! {
        div class="card" {
            div class="badge" { (badge) }
            h1 style="margin: 4px 0;" { (titulo) }
            @if !descripcion.is_empty() {
                p style="color: var(--text-weak); margin: 0; font-size: 0.9rem;" { (descripcion) }
            }
        }
    }
}

/// Light card wrapping a block of content.
pub fn card_light(titulo: &str, body: Markup) -> Markup {
    html! {
        section class="card-light" {
            @if !titulo.is_empty() {
                h3 style="margin-top: 4px;" { (titulo) }
            }
            (body)
        }
    }
}
