mod clientes_tests;
mod dashboard_tests;
mod proyectos_tests;
mod spreadsheets_tests;
