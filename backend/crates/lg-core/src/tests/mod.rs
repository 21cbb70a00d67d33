mod display_name;
