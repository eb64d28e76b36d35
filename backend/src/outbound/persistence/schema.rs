//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match the migrations exactly; regenerate with
//! `diesel print-schema` after changing them.

diesel::table! {
    /// Delivery agents and back-office users.
    usuarios (id) {
        id -> Int4,
        nombre -> Varchar,
        email -> Varchar,
        /// Argon2id PHC string.
        password_hash -> Varchar,
        rol -> Varchar,
    }
}

diesel::table! {
    /// Parcels with destination coordinates and assignment.
    paquetes (id) {
        id -> Int4,
        referencia -> Varchar,
        direccion -> Varchar,
        lat_destino -> Float8,
        lon_destino -> Float8,
        agente_asignado -> Int4,
        estado -> Varchar,
    }
}

diesel::table! {
    /// Completed deliveries with proof photo and GPS fix.
    entregas (id) {
        id -> Int4,
        paquete_id -> Int4,
        agente_id -> Int4,
        foto_url -> Varchar,
        lat_gps -> Float8,
        lon_gps -> Float8,
    }
}

diesel::joinable!(paquetes -> usuarios (agente_asignado));
diesel::joinable!(entregas -> paquetes (paquete_id));
diesel::joinable!(entregas -> usuarios (agente_id));

diesel::allow_tables_to_appear_in_same_query!(usuarios, paquetes, entregas);
