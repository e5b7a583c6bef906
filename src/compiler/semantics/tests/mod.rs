mod table_builder;
