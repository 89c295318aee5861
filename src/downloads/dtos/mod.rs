pub mod download_query_dto;
