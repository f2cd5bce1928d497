pub mod buscar;
pub mod clientes;
pub mod dashboard;
pub mod kanban;
pub mod panel;
pub mod proyectos;
