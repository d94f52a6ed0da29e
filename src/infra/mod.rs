pub mod csv_archive;
