pub mod daycare;
