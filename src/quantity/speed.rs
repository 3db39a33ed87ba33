quantity!(KilometersPerHour, suffix: "km/h", precision: 1);
