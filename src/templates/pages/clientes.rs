use crate::templates::{card, card_light, desktop_layout};
use maud::{html, Markup};

pub struct ClienteFilaVm {
    pub id: String,
    pub nombre: String,
    pub empresa: String,
    pub tipo_cliente: String,
    pub email: String,
    pub telefono: String,
    pub ciudad: String,
    pub provincia: String,
    pub notas: String,
}

pub struct ClientesVm {
    pub clientes: Vec<ClienteFilaVm>,
}

const TIPOS_CLIENTE: [&str; 5] = [
    "Ingeniería",
    "Promotora",
    "Arquitectura",
    "Integrator Partner",
    "Otro",
];

pub fn clientes_page(vm: &ClientesVm) -> Markup {
    desktop_layout(
        "Clientes",
        "/clientes",
        html! {
            (card(
                "Relaciones",
                "Clientes",
                "Gestiona ingenierías, arquitecturas, promotoras e integrators clave para la prescripción.",
            ))

            (card_light("➕ Añadir nuevo cliente", formulario_alta()))

            (card_light("📋 Listado de clientes", html! {
                @if vm.clientes.is_empty() {
                    p class="aviso" { "Aún no hay clientes en el CRM." }
                } @else {
                    table class="tabla" {
                        thead {
                            tr {
                                th { "Contacto" }
                                th { "Empresa" }
                                th { "Tipo" }
                                th { "Email" }
                                th { "Teléfono" }
                                th { "Ciudad" }
                                th { "Provincia" }
                                th { "Notas" }
                                th { "" }
                            }
                        }
                        tbody {
                            @for cliente in &vm.clientes {
                                tr {
                                    td { (cliente.nombre) }
                                    td { (cliente.empresa) }
                                    td { (cliente.tipo_cliente) }
                                    td { (cliente.email) }
                                    td { (cliente.telefono) }
                                    td { (cliente.ciudad) }
                                    td { (cliente.provincia) }
                                    td { (cliente.notas) }
                                    td {
                                        form action="/clientes/borrar" method="post" style="margin: 0;" {
                                            input type="hidden" name="id" value=(cliente.id);
                                            button type="submit" class="peligro"
                                                onclick="return confirm('¿Borrar este cliente?');" { "🗑️" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }))
        },
    )
}

fn formulario_alta() -> Markup {
    html! {
        form class="formulario" action="/clientes/nuevo" method="post" {
            div class="form-columnas" {
                div {
                    label for="nombre" { "Nombre / persona de contacto" }
                    input type="text" id="nombre" name="nombre";
                    label for="empresa" { "Empresa" }
                    input type="text" id="empresa" name="empresa";
                    label for="tipo_cliente" { "Tipo de cliente" }
                    select id="tipo_cliente" name="tipo_cliente" {
                        @for tipo in TIPOS_CLIENTE {
                            option value=(tipo) { (tipo) }
                        }
                    }
                }
                div {
                    label for="email" { "Email" }
                    input type="email" id="email" name="email";
                    label for="telefono" { "Teléfono" }
                    input type="text" id="telefono" name="telefono";
                    label for="ciudad_cliente" { "Ciudad" }
                    input type="text" id="ciudad_cliente" name="ciudad";
                    label for="provincia_cliente" { "Provincia" }
                    input type="text" id="provincia_cliente" name="provincia";
                }
            }
            label for="notas" { "Notas (proyectos, relación, info importante)" }
            textarea id="notas" name="notas" rows="3" {}
            button type="submit" { "Guardar cliente" }
        }
    }
}
