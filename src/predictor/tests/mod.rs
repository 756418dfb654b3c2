mod aggregate;
mod filtering;
