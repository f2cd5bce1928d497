//! The single stylesheet of the app, embedded in the layout so there is
//! no static-file route to serve. Tokens loosely follow the Salesforce
//! Lightning palette the sales team is used to.

pub const HOJA_ESTILOS: &str = r#"
:root {
    --brand: #0170D2;
    --brand-dark: #014486;
    --brand-light: #E8F3FF;
    --text: #032D60;
    --text-weak: #5A6872;
    --bg: #F3F6FB;
    --bg-card: #FFFFFF;
    --border: #D8E6FF;
    --danger: #dc2626;
    --ok: #10b981;
}

* { box-sizing: border-box; }

body {
    margin: 0;
    background: var(--bg);
    color: var(--text);
    font-family: "Segoe UI", system-ui, sans-serif;
    font-size: 14px;
}

.topbar {
    display: flex;
    align-items: center;
    justify-content: space-between;
    padding: 10px 24px;
    background: var(--bg-card);
    border-bottom: 1px solid var(--border);
    box-shadow: 0 1px 2px rgba(3, 45, 96, 0.04);
}

.topbar-title { font-size: 18px; font-weight: 600; color: var(--brand); }

.topbar nav a {
    color: var(--text-weak);
    text-decoration: none;
    padding: 6px 10px;
    border-radius: 6px;
    margin-left: 2px;
}

.topbar nav a.activo {
    background: var(--brand-light);
    color: var(--brand-dark);
    font-weight: 600;
}

main.contenedor { max-width: 1250px; margin: 0 auto; padding: 16px 24px 48px; }

.card {
    background: var(--bg-card);
    border: 1px solid var(--border);
    border-radius: 6px;
    box-shadow: 0 1px 2px rgba(3, 45, 96, 0.12);
    padding: 16px 20px;
    margin-bottom: 20px;
}

.card-light {
    background: var(--bg-card);
    border: 1px solid var(--border);
    border-radius: 6px;
    padding: 12px 16px;
    margin-bottom: 14px;
}

.badge {
    display: inline-block;
    background: var(--brand-light);
    color: var(--brand-dark);
    font-size: 11px;
    font-weight: 600;
    text-transform: uppercase;
    letter-spacing: 0.05em;
    padding: 2px 8px;
    border-radius: 10px;
}

.metricas { display: flex; gap: 14px; flex-wrap: wrap; }

.metrica {
    flex: 1 1 150px;
    background: var(--bg-card);
    border: 1px solid var(--border);
    border-radius: 6px;
    padding: 12px 16px;
}

.metrica .etiqueta { font-size: 12px; color: var(--text-weak); }
.metrica .valor { font-size: 22px; font-weight: 600; margin-top: 2px; }

table.tabla { width: 100%; border-collapse: collapse; margin-top: 10px; }
table.tabla th {
    padding: 10px 8px;
    border-bottom: 2px solid var(--border);
    text-align: left;
    font-size: 12.5px;
    color: var(--text-weak);
}
table.tabla td { padding: 8px; border-bottom: 1px solid #f3f4f6; }

.barra-fondo { background: var(--brand-light); border-radius: 4px; height: 14px; }
.barra { background: var(--brand); border-radius: 4px; height: 14px; }

.kanban { display: flex; gap: 10px; align-items: flex-start; overflow-x: auto; }
.kanban-col { flex: 1 0 140px; }
.kanban-col h4 { font-size: 14px; font-weight: 600; margin: 0 0 8px; }
.kanban-tarjeta {
    background: var(--bg-card);
    border: 1px solid var(--border);
    border-left: 4px solid var(--brand);
    border-radius: 6px;
    padding: 10px;
    margin-bottom: 10px;
    font-size: 12px;
}
.kanban-tarjeta .titulo { font-weight: 600; font-size: 13px; }
.kanban-tarjeta .detalle { color: var(--text-weak); }
.kanban-vacia { color: var(--text-weak); text-align: center; padding: 8px; }

form.formulario label { display: block; font-size: 12px; color: var(--text-weak); margin-top: 8px; }
form.formulario input, form.formulario select, form.formulario textarea {
    width: 100%;
    padding: 7px 8px;
    border: 1px solid var(--border);
    border-radius: 4px;
    font-size: 13px;
}
.form-columnas { display: grid; grid-template-columns: 1fr 1fr; gap: 0 18px; }

button, .boton {
    margin-top: 12px;
    background: var(--brand);
    color: white;
    padding: 7px 14px;
    border: none;
    border-radius: 4px;
    cursor: pointer;
    font-size: 13px;
    text-decoration: none;
    display: inline-block;
}
button.peligro { background: var(--danger); margin-top: 0; padding: 3px 8px; }
button.enlace { background: none; color: var(--brand); margin-top: 0; padding: 3px 8px; }

.aviso { color: var(--text-weak); font-style: italic; }
.alerta { color: var(--danger); font-weight: 600; }
.exito { color: var(--ok); font-weight: 600; }

pre.prompt {
    background: #0b2239;
    color: #d8e6ff;
    padding: 14px;
    border-radius: 6px;
    white-space: pre-wrap;
    font-size: 12.5px;
}
"#;
