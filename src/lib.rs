// ============================================================================
// CoinBoard - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod api;     // Services mock asynchrones (marché, auth, communauté)
pub mod app;     // État de l'interface (écran, sélection, saisie)
pub mod config;  // Configuration (fichier + environnement)
pub mod models;  // Structures de données
pub mod storage; // Stockage local clé/valeur
pub mod store;   // Store central : slices, actions, thunks
pub mod ticker;  // Simulation des prix en temps réel
pub mod ui;      // Interface utilisateur
